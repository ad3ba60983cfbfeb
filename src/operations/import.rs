use crate::db::repository;
use crate::models::transaction::{NewTransaction, TransactionType};
use crate::{Database, Error};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::str::FromStr;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    CSV,
}

impl ImportFormat {
    /// Pick the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ImportFormat::CSV,
            _ => ImportFormat::Json,
        }
    }
}

/// One record of a seed file. The amount is kept as text until it is parsed
/// as a [Decimal], so it never passes through a float.
#[derive(Debug, Clone, Deserialize)]
struct SeedRecord {
    date: String,
    description: Option<String>,
    category: Option<String>,
    amount: String,
    #[serde(rename = "type")]
    transaction_type: String,
}

/// JSON records may give the amount as a number or as a string.
#[derive(Debug, Clone, Deserialize)]
struct JsonSeedRecord {
    date: String,
    description: Option<String>,
    category: Option<String>,
    amount: serde_json::Value,
    #[serde(rename = "type")]
    transaction_type: String,
}

impl From<JsonSeedRecord> for SeedRecord {
    fn from(record: JsonSeedRecord) -> Self {
        let amount = match record.amount {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };

        Self {
            date: record.date,
            description: record.description,
            category: record.category,
            amount,
            transaction_type: record.transaction_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
}

fn read_json(path: &Path) -> Result<Vec<SeedRecord>, Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let records: Vec<JsonSeedRecord> = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(records.into_iter().map(SeedRecord::from).collect())
}

fn read_csv(path: &Path) -> Result<Vec<SeedRecord>, Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(file);

    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Turn raw records into transactions. Records with an unknown type or a
/// negative amount are skipped with a warning; a malformed date or amount
/// fails the batch.
fn convert_records(records: Vec<SeedRecord>) -> Result<(Vec<NewTransaction>, usize), Error> {
    let mut transactions = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.into_iter().enumerate() {
        let line = index + 1;

        let transaction_type: TransactionType = match record.transaction_type.parse() {
            Ok(transaction_type) => transaction_type,
            Err(error) => {
                tracing::warn!("skipping record {line}: {error}");
                skipped += 1;
                continue;
            }
        };
        let amount = Decimal::from_str(record.amount.trim()).map_err(|_| {
            Error::InvalidArgument(format!("record {line}: invalid amount '{}'", record.amount))
        })?;
        if amount < Decimal::ZERO {
            tracing::warn!("skipping record {line}: negative amount {amount}");
            skipped += 1;
            continue;
        }

        let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d").map_err(|_| {
            Error::InvalidArgument(format!("record {line}: invalid date '{}'", record.date))
        })?;

        transactions.push(NewTransaction::new(
            date,
            record.description,
            record.category,
            amount,
            transaction_type,
        ));
    }

    Ok((transactions, skipped))
}

/// Bulk load transactions from a JSON array or a CSV file with the header
/// `date,description,category,amount,type`.
///
/// All valid records are inserted in one database transaction.
pub fn import_transactions_to_db(
    database: &Database,
    format: ImportFormat,
    path: &Path,
) -> Result<ImportReport, Error> {
    let records = match format {
        ImportFormat::Json => read_json(path)?,
        ImportFormat::CSV => read_csv(path)?,
    };
    let (transactions, skipped) = convert_records(records)?;
    let inserted = repository::insert_transactions(database, &transactions)?;

    Ok(ImportReport { inserted, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_database;
    use crate::query::list_transactions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_file(contents: &str, suffix: &str) -> NamedTempFile {
        let mut tmp = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test file");
        tmp
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ImportFormat::from_path(Path::new("seed.CSV")),
            ImportFormat::CSV
        );
        assert_eq!(
            ImportFormat::from_path(Path::new("seed_data.json")),
            ImportFormat::Json
        );
    }

    #[test]
    fn test_import_json_skips_invalid_type() {
        let (_dir, database) = establish_test_database();
        let json = r#"[
            {"date": "2024-01-15", "description": "Pay", "category": "Salary",
             "amount": 1000.5, "type": "income"},
            {"date": "2024-01-16", "description": "Move", "category": "Savings",
             "amount": 50, "type": "transfer"},
            {"date": "2024-01-20", "description": "Rent", "category": "Rent",
             "amount": "400.00", "type": "expense"}
        ]"#;
        let tmp = write_temp_file(json, ".json");

        let report = import_transactions_to_db(&database, ImportFormat::Json, tmp.path()).unwrap();
        assert_eq!(report, ImportReport { inserted: 2, skipped: 1 });

        let all = list_transactions(&database, &[], None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].amount, Decimal::new(10005, 1));
        assert_eq!(all[1].transaction_type, TransactionType::Expense);
        assert_eq!(all[1].amount.to_string(), "400.00");
    }

    #[test]
    fn test_import_skips_negative_amount() {
        let (_dir, database) = establish_test_database();
        let csv_data = "\
date,description,category,amount,type
2024-03-01,Lunch,Food,12.00,expense
2024-03-02,Refund,Food,-5.00,expense
2024-03-03,Pay,Salary,900,income
";
        let tmp = write_temp_file(csv_data, ".csv");

        let report = import_transactions_to_db(&database, ImportFormat::CSV, tmp.path()).unwrap();
        assert_eq!(report, ImportReport { inserted: 2, skipped: 1 });

        let all = list_transactions(&database, &[], None).unwrap();
        let descriptions: Vec<&str> = all.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Lunch", "Pay"]);
    }

    #[test]
    fn test_import_csv_to_db_success() {
        let (_dir, database) = establish_test_database();
        let csv_data = "\
date,description,category,amount,type
2025-11-10,Salary,Job,1500.00,income
2025-11-11,Coffee,Food,3.50,expense
";
        let tmp = write_temp_file(csv_data, ".csv");

        let report = import_transactions_to_db(&database, ImportFormat::CSV, tmp.path()).unwrap();
        assert_eq!(report.inserted, 2);

        let all = list_transactions(&database, &[], None).unwrap();
        assert_eq!(all[1].category, "Food");
        assert_eq!(all[1].amount, Decimal::new(350, 2));
        assert_eq!(all[1].amount.to_string(), "3.50");
    }

    #[test]
    fn test_import_csv_keeps_every_digit() {
        let (_dir, database) = establish_test_database();
        let csv_data = "\
date,description,category,amount,type
2025-11-10,Sale,House,12345678901234567.89,income
";
        let tmp = write_temp_file(csv_data, ".csv");

        import_transactions_to_db(&database, ImportFormat::CSV, tmp.path()).unwrap();

        let all = list_transactions(&database, &[], None).unwrap();
        assert_eq!(
            all[0].amount,
            Decimal::from_str("12345678901234567.89").unwrap()
        );
        assert_eq!(all[0].amount.to_string(), "12345678901234567.89");
    }

    #[test]
    fn test_import_invalid_amount_inserts_nothing() {
        let (_dir, database) = establish_test_database();
        let csv_data = "\
date,description,category,amount,type
2025-11-10,Salary,Job,1500.00,income
2025-11-11,Coffee,Food,three,expense
";
        let tmp = write_temp_file(csv_data, ".csv");

        let result = import_transactions_to_db(&database, ImportFormat::CSV, tmp.path());
        assert!(matches!(
            result,
            Err(Error::InvalidArgument(ref msg)) if msg.contains("record 2")
        ));
        assert!(list_transactions(&database, &[], None).unwrap().is_empty());
    }

    #[test]
    fn test_import_invalid_date_inserts_nothing() {
        let (_dir, database) = establish_test_database();
        let json = r#"[
            {"date": "2024-01-15", "description": "Pay", "category": "Salary",
             "amount": 10, "type": "income"},
            {"date": "bad-date", "description": "Pay", "category": "Salary",
             "amount": 10, "type": "income"}
        ]"#;
        let tmp = write_temp_file(json, ".json");

        let result = import_transactions_to_db(&database, ImportFormat::Json, tmp.path());
        assert!(matches!(
            result,
            Err(Error::InvalidArgument(ref msg)) if msg.contains("record 2")
        ));
        assert!(list_transactions(&database, &[], None).unwrap().is_empty());
    }

    #[test]
    fn test_import_nonexistent_file() {
        let (_dir, database) = establish_test_database();
        let path = Path::new("nonexistent.csv");
        let result = import_transactions_to_db(&database, ImportFormat::CSV, path);

        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
