use nankai_sim::{
    geo::{haversine_km, Coordinate},
    model::MAX_INTENSITY,
    simulate, EarthquakeParameters, RegionCatalog, SimulationResult,
};

fn quake(magnitude: f64, depth_km: f64, lat: f64, lon: f64) -> EarthquakeParameters {
    EarthquakeParameters::new(magnitude, depth_km, lat, lon).expect("parameters in range")
}

fn run(earthquake: &EarthquakeParameters) -> SimulationResult {
    simulate(earthquake, RegionCatalog::nankai())
}

/// Parameter grid covering the dashboard input ranges.
fn parameter_grid() -> Vec<EarthquakeParameters> {
    let mut grid = Vec::new();
    for magnitude in [7.0, 7.5, 8.0, 8.7, 9.0] {
        for depth in [5.0, 25.0, 50.0] {
            for lat in [30.0, 33.0, 34.5, 36.0] {
                for lon in [130.0, 133.5, 136.0, 138.0, 140.0] {
                    grid.push(quake(magnitude, depth, lat, lon));
                }
            }
        }
    }
    grid
}

#[test]
fn default_scenario_matches_reference_table() {
    let result = run(&EarthquakeParameters::default());
    // (region, tsunami height, arrival, deaths, serious, minor)
    let expected = [
        ("静岡市", 0.0, 26.0, 0, 0, 0),
        ("浜松市", 0.0, 21.0, 0, 0, 0),
        ("名古屋市", 0.0, 0.0, 0, 0, 0),
        ("津市", 6.7, 16.0, 6_160, 3_696, 8_624),
        ("大阪市", 6.8, 16.0, 59_400, 35_640, 83_160),
        ("和歌山市", 0.0, 13.0, 0, 0, 0),
        ("高知市", 6.2, 20.0, 6_600, 3_960, 9_240),
        ("徳島市", 7.0, 15.0, 5_850, 3_510, 8_189),
    ];
    assert_eq!(result.len(), expected.len());
    for (region, (name, height, arrival, deaths, serious, minor)) in
        result.iter().zip(expected.iter())
    {
        assert_eq!(region.region_name, *name);
        assert_eq!(region.tsunami.height_m, *height, "{name} height");
        assert_eq!(region.tsunami.arrival_min, *arrival, "{name} arrival");
        assert_eq!(region.casualties.deaths, *deaths, "{name} deaths");
        assert_eq!(region.casualties.serious_injuries, *serious, "{name} serious");
        assert_eq!(region.casualties.minor_injuries, *minor, "{name} minor");
        // Every site is 150+ km away, so shaking stays well below damage tiers.
        assert_eq!(region.building_damage.collapsed, 0, "{name} collapsed");
        assert_eq!(region.economic_loss, 0.0);
    }
}

#[test]
fn kochi_example_is_flooded() {
    let result = run(&quake(8.7, 10.0, 33.0, 136.0));
    let kochi = result.region("高知市").expect("高知市 in result");
    assert!(kochi.tsunami.height_m > 0.0);
    // 6.2 m falls in the >5 m tier
    assert_eq!(kochi.tsunami.inundation_fraction, 0.3);
}

#[test]
fn epicenter_under_kochi() {
    let result = run(&quake(9.0, 5.0, 33.5597, 133.5311));
    let kochi = result.region("高知市").unwrap();
    assert_eq!(kochi.intensity, MAX_INTENSITY);
    assert_eq!(kochi.building_damage.collapsed, 23_100);
    assert_eq!(kochi.building_damage.severe, 36_300);
    assert_eq!(kochi.building_damage.moderate, 18_150);
    assert_eq!(kochi.building_damage.undamaged, 54_450);
    assert_eq!(kochi.tsunami.height_m, 10.0);
    assert_eq!(kochi.tsunami.arrival_min, 0.0);
    // No warning time: nobody evacuates.
    assert_eq!(kochi.casualties.deaths, 10_131);
    assert_eq!(kochi.casualties.serious_injuries, 6_831);
    assert_eq!(kochi.casualties.minor_injuries, 15_938);
    assert_eq!(kochi.infrastructure_outage.electricity, 0.8);
    assert_eq!(kochi.infrastructure_outage.water, 0.9);
    assert_eq!(kochi.infrastructure_outage.gas, 0.85);
    assert_eq!(kochi.economic_loss, 8_613.0);
}

#[test]
fn hamamatsu_elevation_outruns_near_field_wave() {
    // 2.7 km away: 10·e^(−0.005) ≈ 9.95 m, below the 10 m elevation.
    let result = run(&quake(9.0, 5.0, 34.7, 137.7));
    let hamamatsu = result.region("浜松市").unwrap();
    assert_eq!(hamamatsu.tsunami.height_m, 0.0);
    assert_eq!(hamamatsu.tsunami.inundation_fraction, 0.0);
    assert_eq!(hamamatsu.building_damage.collapsed, 52_000);
    assert_eq!(hamamatsu.casualties.deaths, 520);
    assert_eq!(hamamatsu.economic_loss, 19_640.0);
}

#[test]
fn distant_weak_quake_does_no_structural_damage() {
    let result = run(&quake(7.0, 50.0, 30.0, 130.0));
    for region in &result {
        assert_eq!(region.intensity, 0.0, "{}", region.region_name);
        assert_eq!(region.building_damage.collapsed, 0);
        assert_eq!(region.building_damage.severe, 0);
    }
    assert_eq!(result.summary().deaths, 0);
}

#[test]
fn intensity_is_bounded_everywhere() {
    for earthquake in parameter_grid() {
        for region in &run(&earthquake) {
            assert!(
                (0.0..=MAX_INTENSITY).contains(&region.intensity),
                "{} at {earthquake:?}: {}",
                region.region_name,
                region.intensity
            );
        }
    }
}

#[test]
fn building_counts_sum_to_stock() {
    let catalog = RegionCatalog::nankai();
    for earthquake in parameter_grid() {
        let result = simulate(&earthquake, catalog);
        for (region, record) in result.iter().zip(catalog.iter()) {
            assert_eq!(region.building_damage.total(), record.buildings);
        }
    }
}

#[test]
fn inland_region_never_sees_tsunami() {
    for earthquake in parameter_grid() {
        let result = run(&earthquake);
        let nagoya = result.region("名古屋市").unwrap();
        assert_eq!(nagoya.tsunami.height_m, 0.0);
        assert_eq!(nagoya.tsunami.arrival_min, 0.0);
        assert_eq!(nagoya.tsunami.inundation_fraction, 0.0);
    }
}

#[test]
fn outage_fractions_are_unit_interval() {
    for earthquake in parameter_grid() {
        for region in &run(&earthquake) {
            let outage = region.infrastructure_outage;
            for value in [outage.electricity, outage.water, outage.gas] {
                assert!((0.0..=1.0).contains(&value));
            }
            assert!((0.0..=1.0).contains(&region.tsunami.inundation_fraction));
        }
    }
}

#[test]
fn magnitude_is_monotone_for_intensity() {
    for (lat, lon) in [(33.0, 136.0), (34.7, 137.7), (30.0, 130.0)] {
        let mut previous = run(&quake(7.0, 20.0, lat, lon));
        let mut magnitude = 7.1;
        while magnitude <= 9.0 {
            let current = run(&quake(magnitude, 20.0, lat, lon));
            for (before, after) in previous.iter().zip(current.iter()) {
                assert!(after.intensity >= before.intensity, "{}", after.region_name);
            }
            previous = current;
            magnitude += 0.1;
        }
    }
}

#[test]
fn simulate_is_idempotent() {
    let earthquake = quake(8.4, 20.0, 33.5, 135.5);
    assert_eq!(run(&earthquake), run(&earthquake));
}

#[test]
fn distance_properties() {
    let catalog = RegionCatalog::nankai();
    for a in catalog {
        assert_eq!(haversine_km(a.location(), a.location()), 0.0);
        for b in catalog {
            let ab = haversine_km(a.location(), b.location());
            let ba = haversine_km(b.location(), a.location());
            assert!(ab >= 0.0);
            assert!((ab - ba).abs() < 1e-9);
        }
    }
    let kochi = catalog.get("高知市").unwrap();
    let d = haversine_km(Coordinate::new(33.0, 136.0), kochi.location());
    assert!((d - 237.788).abs() < 0.01, "got {d}");
}
