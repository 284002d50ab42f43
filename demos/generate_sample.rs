use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, stdout, BufWriter, Write};
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

const PROBABILITY_FRAUD_FLAG: f64 = 0.02;
const PROBABILITY_UNKNOWN_CARDHOLDER: f64 = 0.01;
const PROBABILITY_MALFORMED_TIMESTAMP: f64 = 0.001;

const MERCHANTS: [(&str, &str); 6] = [
    ("Walmart", "Groceries"),
    ("Expedia", "Travel"),
    ("Amazon", "Shopping"),
    ("Shell", "Fuel"),
    ("Apple", "Electronics"),
    ("Costco", "Wholesale")
];
const STATUSES: [&str; 3] = ["SUCCESS", "PENDING", "FAILED"];
const DEVICES: [&str; 3] = ["Mobile", "Web", "POS"];
const LOCATIONS: [&str; 4] = ["New York, USA", "Toronto, Canada", "San Francisco, USA", "London, UK"];

struct GeneratorConfig {
    num_transactions: usize,
    num_cardholders: usize,
    output_directory: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_transactions = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);
        let num_cardholders = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);

        Self {
            num_transactions,
            num_cardholders: num_cardholders.max(1),
            output_directory: "samples/generated".to_string()
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();
    let directory = Path::new(&config.output_directory);

    println!(
        "Generating {} transactions for {} cardholders in {}...",
        config.num_transactions, config.num_cardholders, config.output_directory
    );

    create_dir_all(directory)?;

    let mut rng = rand::rng();

    generate_cardholders(&mut BufWriter::new(File::create(directory.join("cardholders.csv"))?), &mut rng, config.num_cardholders)?;
    generate_transactions(&mut BufWriter::new(File::create(directory.join("transactions.csv"))?), &mut rng, &config)?;

    println!("\nGeneration complete.");

    Ok(())
}

fn generate_cardholders<W: Write, R: Rng>(writer: &mut W, rng: &mut R, count: usize) -> io::Result<()> {
    writeln!(writer, "cardholder_id,customer_name,reward_points,risk_score")?;

    for id in 1..=count {
        let risk_score = Decimal::from_f64(rng.random_range(0.0..=1.0)).unwrap_or_default().round_dp(2);
        writeln!(writer, "CH{id:06},Customer {id},{},{risk_score}", rng.random_range(0..20_000))?;
    }

    writer.flush()
}

fn generate_transactions<W: Write, R: Rng>(writer: &mut W, rng: &mut R, config: &GeneratorConfig) -> io::Result<()> {
    writeln!(
        writer,
        "transaction_id,cardholder_id,merchant_id,merchant_name,merchant_category,transaction_amount,transaction_currency,transaction_timestamp,transaction_status,fraud_flag,device_type,merchant_location"
    )?;

    for id in 1..=config.num_transactions {
        let cardholder = if rng.random_bool(PROBABILITY_UNKNOWN_CARDHOLDER) {
            "CH999999X".to_string()
        } else {
            format!("CH{:06}", rng.random_range(1..=config.num_cardholders))
        };

        let merchant_index = rng.random_range(0..MERCHANTS.len());
        let (merchant_name, merchant_category) = MERCHANTS[merchant_index];

        writeln!(
            writer,
            "T{id:09},{cardholder},M{merchant_index:03},{merchant_name},{merchant_category},{},USD,{},{},{},{},\"{}\"",
            generate_amount(rng),
            generate_timestamp(rng),
            STATUSES.choose(rng).copied().unwrap_or("SUCCESS"),
            rng.random_bool(PROBABILITY_FRAUD_FLAG),
            DEVICES.choose(rng).copied().unwrap_or("Web"),
            LOCATIONS.choose(rng).copied().unwrap_or("New York, USA")
        )?;

        if id % 100_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    writer.flush()
}

fn generate_amount<R: Rng>(rng: &mut R) -> Decimal {
    //NOTE: Skewed towards small purchases with a long tail past the review threshold
    let max = match rng.random_range(0..100) {
        0..=69 => 100.0,
        70..=94 => 500.0,
        95..=98 => 10_000.0,
        _ => 50_000.0
    };

    Decimal::from_f64(rng.random_range(0.01..max)).unwrap_or_default().round_dp(2)
}

fn generate_timestamp<R: Rng>(rng: &mut R) -> String {
    if rng.random_bool(PROBABILITY_MALFORMED_TIMESTAMP) {
        return "not-a-timestamp".to_string();
    }

    format!(
        "2025-02-{:02}T{:02}:{:02}:{:02}Z",
        rng.random_range(1..=28),
        rng.random_range(0..24),
        rng.random_range(0..60),
        rng.random_range(0..60)
    )
}
