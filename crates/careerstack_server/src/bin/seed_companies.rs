//! Writes a demo company directory to disk. Each seed company appears
//! twenty times so load tests have a realistically sized list.

use anyhow::{Context, Result};

const HEADERS: [&str; 6] = [
    "Company Name",
    "Headquarters",
    "Industry",
    "Career Page URL",
    "Is_Startup",
    "Scrapable",
];

const SEED: [(&str, &str, &str, &str); 3] = [
    (
        "Amazon",
        "Seattle",
        "E-commerce / Cloud",
        "https://www.amazon.jobs/en/search?base_query=software",
    ),
    (
        "Microsoft",
        "Redmond",
        "Software / Cloud",
        "https://careers.microsoft.com/v2/global/en/search",
    ),
    (
        "Google (Alphabet)",
        "Mountain View",
        "Search / Cloud",
        "https://careers.google.com/jobs/results/",
    ),
];

const COPIES: usize = 20;

fn main() -> Result<()> {
    let out = std::env::var("COMPANIES_CSV").unwrap_or_else(|_| "./companies.csv".to_string());

    let mut writer = csv::Writer::from_path(&out)
        .with_context(|| format!("failed to create {out}"))?;
    writer.write_record(HEADERS)?;

    let mut rows = 0usize;
    for copy in 1..=COPIES {
        for (name, hq, industry, url) in SEED {
            let name = if copy > 1 {
                format!("{name} #{copy}")
            } else {
                name.to_string()
            };
            writer.write_record([name.as_str(), hq, industry, url, "no", "yes"])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} rows to {out}");
    Ok(())
}
