use std::collections::HashMap;

use crate::common::{physical_multiplier, NOT_AVAILABLE};
use crate::details::DetailParser;
use crate::extract::{containing_field, labeled_field, marker_field};
use crate::page::PageText;

/// Declared output columns, in the order they appear in the table.
/// Auxiliary columns carried over from a previous dataset follow these.
pub const COLUMNS: [&str; 13] = [
    "Name",
    "CpuClass",
    "Socket",
    "Launched",
    "OverallScore",
    "SingleThreadRating",
    "Clockspeed",
    "TurboSpeed",
    "TDP",
    "Cores",
    "Threads",
    "OverallRank",
    "SingleThreadedRank",
];

/// One row of the output dataset. Every declared field holds either a real
/// value or the N/A sentinel - never an empty string - so the table has no
/// missing cells by construction.
#[derive(Debug)]
pub struct CpuRecord {
    pub name: String,
    pub cpu_class: String,
    pub socket: String,
    pub launched: String,
    pub overall_score: String,
    pub single_thread_rating: String,
    pub clockspeed: String,
    pub turbo_speed: String,
    pub tdp: String,
    pub cores: String,
    pub threads: String,
    pub overall_rank: String,
    pub single_threaded_rank: String,
    /// User-added columns preserved across runs; never produced by scraping.
    pub aux: HashMap<String, String>,
}

impl CpuRecord {
    pub fn new(name: String) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            name,
            cpu_class: na(),
            socket: na(),
            launched: na(),
            overall_score: na(),
            single_thread_rating: na(),
            clockspeed: na(),
            turbo_speed: na(),
            tdp: na(),
            cores: na(),
            threads: na(),
            overall_rank: na(),
            single_threaded_rank: na(),
            aux: HashMap::new(),
        }
    }

    /// Value of a declared column by its output name.
    pub fn field(&self, column: &str) -> &str {
        match column {
            "Name" => &self.name,
            "CpuClass" => &self.cpu_class,
            "Socket" => &self.socket,
            "Launched" => &self.launched,
            "OverallScore" => &self.overall_score,
            "SingleThreadRating" => &self.single_thread_rating,
            "Clockspeed" => &self.clockspeed,
            "TurboSpeed" => &self.turbo_speed,
            "TDP" => &self.tdp,
            "Cores" => &self.cores,
            "Threads" => &self.threads,
            "OverallRank" => &self.overall_rank,
            "SingleThreadedRank" => &self.single_threaded_rank,
            _ => NOT_AVAILABLE,
        }
    }
}

/// Build one complete [`CpuRecord`] from a flattened spec page.
///
/// Optional fields degrade to N/A when their label is missing; the Overall
/// Score heading is required and its absence fails the record. Fields the
/// detail paragraphs never mention stay N/A, so every column is populated
/// once this returns - partial pages cannot misalign later records.
pub fn assemble(page: &PageText) -> anyhow::Result<CpuRecord> {
    let mut record = CpuRecord::new(page.name.clone());
    let multiplier = physical_multiplier(&record.name);

    if let Some(class) = labeled_field(&page.lines, "Class") {
        record.cpu_class = class;
    }
    if let Some(socket) = labeled_field(&page.lines, "Socket") {
        record.socket = socket;
    }
    if let Some(launched) = containing_field(&page.lines, "CPU First Seen on Charts") {
        record.launched = launched;
    }
    if let Some(rating) = labeled_field(&page.lines, "Single Thread Rating") {
        record.single_thread_rating = rating;
    }
    record.overall_score = marker_field(&page.lines, "Average CPU Mark")?;

    for (key, value) in DetailParser::new(multiplier).parse(&page.details)? {
        match key.as_str() {
            "Cores" => record.cores = value,
            "Threads" => record.threads = value,
            "Clockspeed" => record.clockspeed = value,
            "Turbo Speed" => record.turbo_speed = value,
            "TDP" => record.tdp = value,
            /* not a declared column; aux columns only come from merges */
            _ => {}
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use crate::common::NOT_AVAILABLE;
    use crate::page::PageText;

    use super::{assemble, COLUMNS};

    fn i9_page() -> PageText {
        PageText::new(
            "Intel Core i9-9900K @ 3.60GHz",
            &[
                "Class: Desktop",
                "Socket: FCLGA1151",
                "Average CPU Mark",
                "18815",
                "Single Thread Rating: 2893",
                "CPU First Seen on Charts: Q4 2018",
            ],
            &[
                "Clockspeed: 3.60 GHz",
                "Turbo Speed: 5.00 GHz",
                "Cores: 8 Threads: 16",
                "Typical TDP: 95 W",
            ],
        )
    }

    #[test]
    fn test_assemble_i9_9900k() {
        let record = assemble(&i9_page()).unwrap();
        assert_eq!(record.name, "Intel Core i9-9900K @ 3.60GHz");
        assert_eq!(record.cpu_class, "Desktop");
        assert_eq!(record.socket, "FCLGA1151");
        assert_eq!(record.launched, "Q4 2018");
        assert_eq!(record.overall_score, "18815");
        assert_eq!(record.single_thread_rating, "2893");
        assert_eq!(record.clockspeed, "3.6 GHz");
        assert_eq!(record.turbo_speed, "5.0 GHz");
        assert_eq!(record.tdp, "95 W");
        assert_eq!(record.cores, "8");
        assert_eq!(record.threads, "16");
    }

    #[test]
    fn test_dual_cpu_scales_physical_quantities() {
        let page = PageText::new(
            "Intel Xeon E5-2670 v2 @ 2.50GHz [Dual CPU]",
            &["Class: Server", "Average CPU Mark 16731"],
            &[
                "Cores: 10 Threads: 20",
                "Typical TDP: 115 W",
                "Clockspeed: 2.5 GHz",
            ],
        );
        let record = assemble(&page).unwrap();
        assert_eq!(record.cores, "20");
        assert_eq!(record.threads, "40");
        assert_eq!(record.tdp, "230 W");
        /* clock speed is per-core, never scaled */
        assert_eq!(record.clockspeed, "2.5 GHz");
    }

    #[test]
    fn test_every_column_populated_never_empty() {
        let page = PageText::new("Some CPU", &["Average CPU Mark 100"], &[]);
        let record = assemble(&page).unwrap();
        for column in &COLUMNS {
            let value = record.field(column);
            assert!(!value.is_empty(), "{} must be populated", column);
        }
        assert_eq!(record.cpu_class, NOT_AVAILABLE);
        assert_eq!(record.turbo_speed, NOT_AVAILABLE);
        assert_eq!(record.cores, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_score_heading_fails_the_record() {
        let page = PageText::new("Some CPU", &["Class: Desktop"], &[]);
        assert!(assemble(&page).is_err());
    }
}
