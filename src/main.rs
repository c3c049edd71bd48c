use anyhow::Result;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use museum_sim::{reconcile, AdmissionReport, Museum, Scenario};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };

    let scenario = match args.first().map(String::as_str) {
        Some("run") => {
            let path = args.get(1).ok_or_else(|| usage("run needs a scenario file"))?;
            Scenario::load_json(Path::new(path))?
        }
        Some("import") => {
            let (exhibits, patrons) = match (args.get(1), args.get(2)) {
                (Some(e), Some(p)) => (e, p),
                _ => return Err(usage("import needs exhibits.csv and patrons.csv")),
            };
            let name = args.get(3).map(String::as_str).unwrap_or("Museum");
            Scenario::load_csv(name, Path::new(exhibits), Path::new(patrons))?
        }
        Some(other) => return Err(usage(&format!("unknown command: {}", other))),
        None => Scenario::dmns(),
    };

    let (museum, reports) = scenario.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&museum)?);
    } else {
        print_summary(&museum, &reports);
    }

    Ok(())
}

fn usage(problem: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "{}\n\nUsage:\n  museum-sim [--json]\n  museum-sim run <scenario.json> [--json]\n  museum-sim import <exhibits.csv> <patrons.csv> [museum name] [--json]",
        problem
    )
}

fn print_summary(museum: &Museum, reports: &[AdmissionReport]) {
    println!("🏛️  {}", museum.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n🖼️  Exhibits");
    for (exhibit, revenue) in museum.revenue_by_exhibit() {
        let attendees: Vec<&str> = museum
            .patrons_of_exhibit(exhibit)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        println!(
            "  {} (${}) → ${} from [{}]",
            exhibit.name(),
            exhibit.cost(),
            revenue,
            attendees.join(", ")
        );
    }

    println!("\n🎟️  Admissions");
    for report in reports {
        println!("  ✓ {}", report.summary());
        for skipped in &report.skipped {
            println!(
                "      skipped {} (${}, short ${})",
                skipped.exhibit_name,
                skipped.cost,
                skipped.shortfall()
            );
        }
    }

    println!("\n💰 Revenue: ${}", museum.revenue());

    let reconciliation = reconcile(museum);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if reconciliation.is_balanced() {
        println!("✅ {}", reconciliation.summary());
    } else {
        println!("❌ {}", reconciliation.summary());
        for discrepancy in &reconciliation.discrepancies {
            println!("   - {}", discrepancy.description);
        }
    }
}
