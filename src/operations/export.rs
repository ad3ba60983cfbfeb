use std::io::Write;
use std::path::Path;

use super::list::{ListArgs, list_transactions_from_db};
use crate::models::transaction::Transaction;
use crate::{Database, Error};

pub const DEFAULT_CSV_FILENAME: &str = "transactions.csv";

/// Write `transactions` as CSV with the header
/// `id,date,description,category,amount,type`.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for transaction in transactions {
        writer.serialize(transaction)?;
    }
    if transactions.is_empty() {
        writer.write_record(["id", "date", "description", "category", "amount", "type"])?;
    }
    writer.flush().map_err(|e| Error::Csv(e.into()))?;
    Ok(())
}

/// Export the transactions selected by `args` to the CSV file at `path` and
/// return how many were written.
pub fn export_transactions_to_csv(
    database: &Database,
    args: &ListArgs,
    path: &Path,
) -> Result<usize, Error> {
    let (_, transactions) = list_transactions_from_db(database, args)?;

    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    write_csv(file, &transactions)?;

    tracing::info!("exported {} transactions to {}", transactions.len(), path.display());
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_database;
    use crate::models::transaction::TransactionType;
    use crate::operations::add::{TransactionInput, add_transaction_to_db};
    use crate::query::FilterInput;

    #[test]
    fn test_write_csv_has_header_and_rows() {
        let (_dir, database) = establish_test_database();
        let input = TransactionInput {
            date: Some("2024-01-15".to_string()),
            description: Some("Pay, January".to_string()),
            category: Some("Salary".to_string()),
            amount: "1000.00".to_string(),
        };
        let stored = add_transaction_to_db(&database, &input, TransactionType::Income).unwrap();

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[stored]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "id,date,description,category,amount,type\n\
             1,2024-01-15,\"Pay, January\",Salary,1000.00,income\n"
        );
    }

    #[test]
    fn test_write_csv_empty_still_has_header() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "id,date,description,category,amount,type\n"
        );
    }

    #[test]
    fn test_export_applies_filter() {
        let (dir, database) = establish_test_database();
        let rows = [
            ("Salary", TransactionType::Income),
            ("Rent", TransactionType::Expense),
        ];
        for (category, transaction_type) in rows {
            let input = TransactionInput {
                date: Some("2024-01-15".to_string()),
                category: Some(category.to_string()),
                amount: "1".to_string(),
                ..Default::default()
            };
            add_transaction_to_db(&database, &input, transaction_type).unwrap();
        }

        let path = dir.path().join(DEFAULT_CSV_FILENAME);
        let args = ListArgs {
            filter: FilterInput {
                category: Some("Rent".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let count = export_transactions_to_csv(&database, &args, &path).unwrap();

        assert_eq!(count, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Rent"));
    }
}
