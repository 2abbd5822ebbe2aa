//! CSV 销售报表
//!
//! 一行一个订单，日期按业务时区格式化，多值列用 `"; "` 连接。

use chrono::FixedOffset;
use shared::models::SaleRecord;

use crate::utils::time::filename_stamp;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const HEADER: [&str; 9] = [
    "ID",
    "Order number",
    "Customer",
    "Items",
    "Quantities",
    "Total",
    "Payment",
    "Status",
    "Created at",
];

const LIST_SEPARATOR: &str = "; ";

/// Rendered report ready to be sent as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesExport {
    pub filename: String,
    pub content: Vec<u8>,
}

/// `sales_report_<YYYY-mm-dd_HH-MM>.csv`
pub fn export_filename(now_millis: i64, offset: FixedOffset) -> String {
    format!("sales_report_{}.csv", filename_stamp(now_millis, offset))
}

/// Render `records` as CSV bytes (header included)
pub fn write_csv(records: &[SaleRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for record in records {
        let quantities = record
            .quantities
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR);
        writer.write_record([
            record.id.to_string(),
            record.order_number.clone(),
            record.customer_name.clone(),
            record.items.join(LIST_SEPARATOR),
            quantities,
            format!("{:.2}", record.total),
            record.payment_method.clone(),
            record.status.to_string(),
            record.created_at_local.clone(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::offset_from_hours;
    use shared::models::OrderStatus;

    fn record() -> SaleRecord {
        SaleRecord {
            id: 7,
            order_number: "007".into(),
            customer_name: "Ana, Jr".into(),
            items: vec!["Pie".into(), "Juice".into()],
            quantities: vec![3, 1],
            total: 19.0,
            payment_method: "pix".into(),
            status: OrderStatus::Completed,
            created_at: 1_709_305_445_000,
            created_at_local: "01/03/2024 12:04:05".into(),
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let bytes = write_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "ID,Order number,Customer,Items,Quantities,Total,Payment,Status,Created at\n"
        );
    }

    #[test]
    fn test_row_layout() {
        let bytes = write_csv(&[record()]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(&row[0], "7");
        assert_eq!(&row[1], "007");
        assert_eq!(&row[2], "Ana, Jr");
        assert_eq!(&row[3], "Pie; Juice");
        assert_eq!(&row[4], "3; 1");
        assert_eq!(&row[5], "19.00");
        assert_eq!(&row[7], "completed");
        assert_eq!(&row[8], "01/03/2024 12:04:05");
    }

    #[test]
    fn test_filename() {
        let offset = offset_from_hours(-3).unwrap();
        assert_eq!(
            export_filename(1_709_305_445_000, offset),
            "sales_report_2024-03-01_12-04.csv"
        );
    }
}
