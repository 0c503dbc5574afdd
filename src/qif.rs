use crate::amount::{normalize, reverse_sign};
use crate::date_format;
use crate::settings::{ColumnMapping, ConversionOptions};

pub const RECORD_END: &str = "^";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QifField {
    Date,
    Amount,
    Memo,
    Payee,
    Category,
    Address,
    RefNumber,
    Cleared,
    ReimburseFlag,
    SplitCategory,
    SplitMemo,
    SplitAmount,
    SplitPercentage,
}

/// Order in which fields appear inside a QIF record.
pub const EMISSION_ORDER: [QifField; 13] = [
    QifField::Date,
    QifField::Amount,
    QifField::Memo,
    QifField::Payee,
    QifField::Category,
    QifField::Address,
    QifField::RefNumber,
    QifField::Cleared,
    QifField::ReimburseFlag,
    QifField::SplitCategory,
    QifField::SplitMemo,
    QifField::SplitAmount,
    QifField::SplitPercentage,
];

impl QifField {
    pub fn code(self) -> char {
        match self {
            Self::Date => 'D',
            Self::Amount => 'T',
            Self::Memo => 'M',
            Self::Payee => 'P',
            Self::Category => 'L',
            Self::Address => 'A',
            Self::RefNumber => 'N',
            Self::Cleared => 'C',
            Self::ReimburseFlag => 'F',
            Self::SplitCategory => 'S',
            Self::SplitMemo => 'E',
            Self::SplitAmount => '$',
            Self::SplitPercentage => '%',
        }
    }

    pub fn column(self, columns: &ColumnMapping) -> Option<usize> {
        match self {
            Self::Date => columns.date,
            Self::Amount => columns.amount,
            Self::Memo => columns.memo,
            Self::Payee => columns.payee,
            Self::Category => columns.category,
            Self::Address => columns.address,
            Self::RefNumber => columns.ref_number,
            Self::Cleared => columns.cleared,
            Self::ReimburseFlag => columns.reimburse_flag,
            Self::SplitCategory => columns.split_category,
            Self::SplitMemo => columns.split_memo,
            Self::SplitAmount => columns.split_amount,
            Self::SplitPercentage => columns.split_percentage,
        }
    }
}

pub fn header_line(account_type: &str) -> String {
    format!("!Type:{account_type}")
}

/// QIF lines produced from one CSV row, without line terminators. Cells
/// are raw bytes so non-UTF-8 exports pass through untouched. `lines` ends
/// with `^` whenever `has_data` is set and is empty otherwise.
#[derive(Debug, Default, PartialEq)]
pub struct MappedRow {
    pub lines: Vec<Vec<u8>>,
    pub has_data: bool,
    /// The date cell did not match the CSV date pattern and was kept raw.
    pub date_fallback: bool,
}

pub fn map_row<S: AsRef<[u8]>>(
    row: &[S],
    columns: &ColumnMapping,
    options: &ConversionOptions,
) -> MappedRow {
    let mut mapped = MappedRow::default();

    for field in EMISSION_ORDER {
        let Some(cell) = field
            .column(columns)
            .and_then(|idx| row.get(idx))
            .map(|c| c.as_ref())
            .filter(|c| !c.is_empty())
        else {
            continue;
        };

        let mut line = Vec::with_capacity(cell.len() + 1);
        line.push(field.code() as u8);
        match field {
            QifField::Date => match map_date(cell, options) {
                DateCell::Reformatted(date) => line.extend_from_slice(date.as_bytes()),
                DateCell::Raw => line.extend_from_slice(cell),
                DateCell::Unparseable => {
                    mapped.date_fallback = true;
                    line.extend_from_slice(cell);
                }
            },
            QifField::Amount | QifField::SplitAmount => {
                line.extend_from_slice(map_amount(cell, options).as_bytes())
            }
            _ => line.extend_from_slice(cell),
        }
        mapped.lines.push(line);
        mapped.has_data = true;
    }

    if mapped.has_data {
        mapped.lines.push(RECORD_END.as_bytes().to_vec());
    }
    mapped
}

enum DateCell {
    Raw,
    Reformatted(String),
    Unparseable,
}

fn map_date(cell: &[u8], options: &ConversionOptions) -> DateCell {
    if options.csv_date_format.is_empty() || options.qif_date_format.is_empty() {
        return DateCell::Raw;
    }
    let raw = String::from_utf8_lossy(cell);
    match date_format::reformat(&raw, &options.csv_date_format, &options.qif_date_format) {
        Ok(date) => DateCell::Reformatted(date),
        Err(e) => {
            log::warn!(
                "keeping date {raw:?} as-is, it does not match {:?}: {e}",
                options.csv_date_format
            );
            DateCell::Unparseable
        }
    }
}

// A cell with no digits still yields an (empty) amount line.
fn map_amount(cell: &[u8], options: &ConversionOptions) -> String {
    let amount = normalize(String::from_utf8_lossy(cell).trim());
    if options.csv_reverse_amount_sign {
        reverse_sign(&amount)
    } else {
        amount
    }
}
