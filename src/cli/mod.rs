pub mod convert;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::settings::{ColumnMapping, ConversionOptions, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "csv2qif",
    version,
    about = "Convert a CSV file to a QIF file.",
    after_help = "Column indexes start at 0. Date formats use YYYY, YY, MMMM, MMM, MM, M, DD and D, \
                  e.g. DD/MM/YYYY.\nWhen CONFIG_FILE is given, the column and format options are ignored."
)]
pub struct Cli {
    /// The CSV input file
    pub csv_file: String,
    /// The QIF output file (created or overwritten)
    pub qif_file: String,
    /// JSON config file with the same settings as the options below
    pub config_file: Option<String>,

    /// The CSV file starts with a header row
    #[arg(long = "csv-has-header", alias = "csvHasHeader")]
    pub csv_has_header: bool,
    /// Column for the Date field (D)
    #[arg(long = "csv-column-date", alias = "csvColumnDate", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_date: Option<i64>,
    /// Column for the Amount field (T)
    #[arg(long = "csv-column-amount", alias = "csvColumnAmount", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_amount: Option<i64>,
    /// Column for the Memo field (M)
    #[arg(long = "csv-column-memo", alias = "csvColumnMemo", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_memo: Option<i64>,
    /// Column for the Payee field (P)
    #[arg(long = "csv-column-payee", alias = "csvColumnPayee", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_payee: Option<i64>,
    /// Column for the Category field (L)
    #[arg(long = "csv-column-category", alias = "csvColumnCategory", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_category: Option<i64>,
    /// Column for the Address field (A)
    #[arg(long = "csv-column-address", alias = "csvColumnAddress", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_address: Option<i64>,
    /// Column for the RefNumber field (N)
    #[arg(long = "csv-column-ref-number", alias = "csvColumnRefNumber", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_ref_number: Option<i64>,
    /// Column for the Cleared field (C)
    #[arg(long = "csv-column-cleared", alias = "csvColumnCleared", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_cleared: Option<i64>,
    /// Column for the ReimburseFlag field (F)
    #[arg(long = "csv-column-reimburse-flag", alias = "csvColumnReimburseFlag", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_reimburse_flag: Option<i64>,
    /// Column for the SplitCategory field (S)
    #[arg(long = "csv-column-split-category", alias = "csvColumnSplitCategory", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_split_category: Option<i64>,
    /// Column for the SplitMemo field (E)
    #[arg(long = "csv-column-split-memo", alias = "csvColumnSplitMemo", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_split_memo: Option<i64>,
    /// Column for the SplitAmount field ($)
    #[arg(long = "csv-column-split-amount", alias = "csvColumnSplitAmount", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_split_amount: Option<i64>,
    /// Column for the SplitPercentage field (%)
    #[arg(long = "csv-column-split-percentage", alias = "csvColumnSplitPercentage", value_name = "INDEX", allow_negative_numbers = true)]
    pub csv_column_split_percentage: Option<i64>,
    /// Date format used in the CSV file (e.g. YYYY-MM-DD)
    #[arg(long = "csv-date-format", alias = "csvDateFormat", value_name = "FORMAT")]
    pub csv_date_format: Option<String>,
    /// Flip the sign of every amount
    #[arg(long = "csv-reverse-amount-sign", alias = "csvReverseAmountSign")]
    pub csv_reverse_amount_sign: bool,
    /// Account type for the QIF file [default: Bank]
    #[arg(long = "qif-account-type", alias = "qifAccountType", value_name = "TYPE")]
    pub qif_account_type: Option<String>,
    /// Date format used in the QIF file (e.g. MM/DD/YYYY)
    #[arg(long = "qif-date-format", alias = "qifDateFormat", value_name = "FORMAT")]
    pub qif_date_format: Option<String>,

    /// Save the effective settings as a JSON config file before converting
    #[arg(long = "write-config", value_name = "PATH")]
    pub write_config: Option<String>,

    /// Any column or format option was typed on the command line.
    #[arg(skip)]
    pub setting_flags_given: bool,
}

const SETTING_ARGS: &[&str] = &[
    "csv_has_header",
    "csv_column_date",
    "csv_column_amount",
    "csv_column_memo",
    "csv_column_payee",
    "csv_column_category",
    "csv_column_address",
    "csv_column_ref_number",
    "csv_column_cleared",
    "csv_column_reimburse_flag",
    "csv_column_split_category",
    "csv_column_split_memo",
    "csv_column_split_amount",
    "csv_column_split_percentage",
    "csv_date_format",
    "csv_reverse_amount_sign",
    "qif_account_type",
    "qif_date_format",
];

// Negative indexes are accepted for compatibility and mean "not mapped".
fn column(index: Option<i64>) -> Option<usize> {
    index.and_then(|i| usize::try_from(i).ok())
}

impl Cli {
    /// Parse the process arguments, exiting with usage on error or `--help`.
    pub fn parse_args() -> Self {
        let matches = Self::command().get_matches();
        Self::from_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut cli = Self::from_arg_matches(matches)?;
        cli.setting_flags_given = SETTING_ARGS
            .iter()
            .any(|id| matches.value_source(id) == Some(ValueSource::CommandLine));
        Ok(cli)
    }

    /// Settings described by the command-line options alone.
    pub fn flag_settings(&self) -> Settings {
        Settings {
            options: ConversionOptions {
                csv_has_header: self.csv_has_header,
                csv_date_format: self.csv_date_format.clone().unwrap_or_default(),
                csv_reverse_amount_sign: self.csv_reverse_amount_sign,
                qif_account_type: self.qif_account_type.clone().unwrap_or_default(),
                qif_date_format: self.qif_date_format.clone().unwrap_or_default(),
            },
            columns: ColumnMapping {
                date: column(self.csv_column_date),
                amount: column(self.csv_column_amount),
                memo: column(self.csv_column_memo),
                payee: column(self.csv_column_payee),
                category: column(self.csv_column_category),
                address: column(self.csv_column_address),
                ref_number: column(self.csv_column_ref_number),
                cleared: column(self.csv_column_cleared),
                reimburse_flag: column(self.csv_column_reimburse_flag),
                split_category: column(self.csv_column_split_category),
                split_memo: column(self.csv_column_split_memo),
                split_amount: column(self.csv_column_split_amount),
                split_percentage: column(self.csv_column_split_percentage),
            },
        }
    }
}
