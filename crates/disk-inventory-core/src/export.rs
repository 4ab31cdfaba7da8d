use crate::error::Error;
use crate::model::ContentRecord;
use std::io::Write;

const HEADERS: [&str; 4] = ["disco_nombre", "nombre", "fecha_modificacion", "peso_gb"];

/// Write content records in the bulk-import "Contenidos" sheet layout,
/// one row per record, keyed to `disk_name`.
pub fn write_contents_csv<W: Write>(
    writer: W,
    disk_name: &str,
    items: &[ContentRecord],
) -> Result<usize, Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for item in items {
        let modified = item.last_modified.format("%Y-%m-%d").to_string();
        let size = format!("{:.2}", item.size_gb);
        wtr.write_record([disk_name, item.name.as_str(), modified.as_str(), size.as_str()])?;
    }

    wtr.flush()?;
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_contents_sheet_layout() {
        let items = vec![
            ContentRecord {
                name: "Facturas 2024".to_string(),
                size_gb: 15.5,
                last_modified: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            },
            ContentRecord {
                name: "Nomina, anual".to_string(),
                size_gb: 8.2,
                last_modified: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            },
        ];

        let mut buf = Vec::new();
        let rows = write_contents_csv(&mut buf, "Backup 2024", &items).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "disco_nombre,nombre,fecha_modificacion,peso_gb");
        assert_eq!(lines[1], "Backup 2024,Facturas 2024,2024-12-01,15.50");
        assert_eq!(lines[2], "Backup 2024,\"Nomina, anual\",2024-11-15,8.20");
    }

    #[test]
    fn test_empty_items_writes_header_only() {
        let mut buf = Vec::new();
        write_contents_csv(&mut buf, "x", &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
