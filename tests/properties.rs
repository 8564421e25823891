use alchm::{
    ascendant_longitude, greenwich_mean_sidereal_time, local_sidereal_time, AlchemicalDelta,
    AlchemicalProperties, CelestialBody, ElementalProperties, Instant, JulianDay, Metric,
    PlanetSignTable, PlanetaryPositions, SiderealTime, ZodiacPosition, MEAN_OBLIQUITY_DEG,
};
use proptest::prelude::*;
use qtty::Degrees;

/// Millisecond-resolution instants; finer steps are below the Julian Day's
/// `f64` resolution.
fn instant_strategy() -> impl Strategy<Value = Instant> {
    (1600i32..2400, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60_000).prop_map(
        |(y, mo, d, h, mi, ms)| Instant::new(y, mo, d, h, mi, f64::from(ms) / 1000.0).unwrap(),
    )
}

fn longitudes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-720.0f64..720.0, CelestialBody::COUNT)
}

fn chart(longitudes: &[f64]) -> PlanetaryPositions {
    PlanetaryPositions::from_longitudes(CelestialBody::ALL.into_iter().zip(longitudes.iter().copied()))
        .unwrap()
}

fn table_strategy() -> impl Strategy<Value = PlanetSignTable> {
    prop::collection::vec((-2.0f64..2.0, -2.0f64..2.0, -2.0f64..2.0, -2.0f64..2.0), 120).prop_map(|v| {
        PlanetSignTable::from_fn(|body, sign| {
            let (s, e, m, su) = v[body.index() * 12 + sign.index()];
            AlchemicalDelta::new(s, e, m, su)
        })
        .unwrap()
    })
}

proptest! {
    #[test]
    fn julian_day_is_monotonic(a in instant_strategy(), b in instant_strategy()) {
        let (ja, jb) = (JulianDay::from_instant(&a), JulianDay::from_instant(&b));
        if a < b {
            prop_assert!(ja.value() < jb.value());
        } else if b < a {
            prop_assert!(jb.value() < ja.value());
        } else {
            prop_assert_eq!(ja, jb);
        }
    }

    #[test]
    fn sidereal_times_stay_in_range(jd in -1.0e6f64..5.0e6, lon in -180.0f64..=180.0) {
        let gmst = greenwich_mean_sidereal_time(JulianDay::new(jd));
        prop_assert!((0.0..24.0).contains(&gmst.value()));
        let lst = local_sidereal_time(gmst, Degrees::new(lon));
        prop_assert!((0.0..24.0).contains(&lst.value()));
    }

    #[test]
    fn ascendant_stays_in_range(hours in 0.0f64..24.0, lat in -89.9f64..89.9) {
        let asc = ascendant_longitude(
            SiderealTime::from_hours(hours),
            Degrees::new(lat),
            Degrees::new(MEAN_OBLIQUITY_DEG),
        );
        prop_assert!(asc.value().is_finite());
        prop_assert!((0.0..360.0).contains(&asc.value()));
    }

    #[test]
    fn zodiac_position_reconstructs_longitude(lon in -1.0e4f64..1.0e4) {
        let p = ZodiacPosition::from_longitude(Degrees::new(lon));
        prop_assert!((0.0..360.0).contains(&p.exact_longitude));
        prop_assert!(p.degree < 30 && p.minute < 60 && p.second < 60);
        let back = p.reconstructed_longitude().value();
        prop_assert!(back <= p.exact_longitude + 1e-9);
        prop_assert!(p.exact_longitude - back < 1.0 / 3600.0 + 1e-9);
    }

    #[test]
    fn composition_ignores_insertion_order(
        lons in longitudes_strategy(),
        table in table_strategy(),
        rotation in 0usize..CelestialBody::COUNT,
    ) {
        let forward = AlchemicalProperties::compose(&chart(&lons), &table);

        let mut pairs: Vec<_> = CelestialBody::ALL.into_iter().zip(lons.iter().copied()).collect();
        pairs.rotate_left(rotation);
        pairs.reverse();
        let shuffled = PlanetaryPositions::from_longitudes(pairs).unwrap();
        let other = AlchemicalProperties::compose(&shuffled, &table);

        prop_assert_eq!(forward, other);
        prop_assert!(forward.spirit >= 0.0 && forward.essence >= 0.0);
        prop_assert!(forward.matter >= 0.0 && forward.substance >= 0.0);
    }

    #[test]
    fn metrics_are_never_nan_or_infinite(
        s in 0.0f64..50.0, e in 0.0f64..50.0, m in 0.0f64..50.0, su in 0.0f64..50.0,
        f in 0.0f64..1.0, w in 0.0f64..1.0, ea in 0.0f64..1.0, ai in 0.01f64..1.0,
    ) {
        let a = AlchemicalProperties { spirit: s, essence: e, matter: m, substance: su };
        let el = ElementalProperties::new(f, w, ea, ai).unwrap();
        let t = alchm::thermodynamics(&a, &el);
        for (name, metric) in t.iter() {
            if let Metric::Value(v) = metric {
                prop_assert!(v.is_finite(), "{} = {}", name, v);
            }
        }
    }

    #[test]
    fn elemental_profile_sums_to_one(lons in longitudes_strategy()) {
        let e = ElementalProperties::from_positions(&chart(&lons));
        let total = e.fire() + e.water() + e.earth() + e.air();
        prop_assert!((total - 1.0).abs() < 1e-12);
    }
}
