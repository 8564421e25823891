use alchm::{CelestialBody, Engine, GeoCoordinate, Instant, KineticTracker, ZodiacPosition};
use qtty::{Days, Degrees, Seconds};

fn main() -> alchm::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = Engine::default();
    let when: Instant = "2024-03-20T12:00:00Z".parse()?;
    let nyc = GeoCoordinate::new(40.7128, -74.0060)?;

    let jd = engine.julian_day(&when);
    let lst = engine.sidereal_time(&when, &nyc);
    let asc = engine.ascendant(&when, &nyc)?;
    println!("{jd}");
    println!("LST: {lst}");
    println!("Ascendant: {asc}");
    let next = asc.time_to_next_sign();
    println!("  next sign in {}h{:02}m", next.hours, next.minutes);

    let planets = [
        (CelestialBody::Sun, 0.1),
        (CelestialBody::Moon, 128.4),
        (CelestialBody::Mercury, 345.2),
        (CelestialBody::Venus, 330.9),
        (CelestialBody::Mars, 318.0),
        (CelestialBody::Jupiter, 47.3),
        (CelestialBody::Saturn, 343.6),
        (CelestialBody::Uranus, 50.1),
        (CelestialBody::Neptune, 357.2),
    ];
    let chart = engine.chart(&when, &nyc, planets)?;
    for (body, position) in chart.iter() {
        println!("{:>9}: {position}", body.name());
    }

    let snap = engine.evaluate(&chart);
    let a = snap.alchemical;
    println!(
        "Spirit {:.3}  Essence {:.3}  Matter {:.3}  Substance {:.3}",
        a.spirit, a.essence, a.matter, a.substance
    );
    println!("Dominant element: {}", snap.elemental.dominant());
    for (name, metric) in snap.thermodynamics.iter() {
        println!("{name:>10}: {metric:.6}");
    }

    // Two samples a day apart; the Moon moves about 13°.
    let mut tracker = KineticTracker::new();
    let day = Seconds::new(86_400.0);
    let first = tracker.advance(&snap.alchemical, &snap.thermodynamics, jd, day)?;
    let moved = chart.with_position(
        CelestialBody::Moon,
        ZodiacPosition::from_longitude(Degrees::new(141.6)),
    );
    let later = engine.evaluate(&moved);
    let second = tracker.advance(
        &later.alchemical,
        &later.thermodynamics,
        jd + Days::new(1.0),
        day,
    )?;
    for k in [first, second] {
        println!(
            "Q={:.3} V={:.6} I={:.6} P={:.6}",
            k.charge, k.potential_difference, k.current_flow, k.power
        );
    }

    Ok(())
}
