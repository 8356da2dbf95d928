use std::io::Write;

use super::scoring::AppraisalView;

/// Export column keys, in the exact order downstream spreadsheets expect.
pub const EXPORT_COLUMNS: [&str; 15] = [
    "Instructor",
    "Research & Scientific Activities",
    "University Service",
    "Community Service",
    "Quality of Teaching",
    "Total Performance (out of 100)",
    "Total Performance (out of 3)",
    "Institutional Commitment",
    "Collaboration & Teamwork",
    "Professionalism",
    "Client Service",
    "Achieving Results",
    "Total Capabilities (out of 100)",
    "Total Capabilities (out of 7)",
    "Overall Total (out of 5)",
];

/// Flat export row shared by the CSV writer and any table renderer (the PDF
/// adapter consumes the same shape).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub instructor: String,
    pub research: f64,
    pub university_service: f64,
    pub community_service: f64,
    pub teaching_quality: f64,
    pub raw_performance: f64,
    pub scaled_performance: f64,
    pub capacities: [f64; 5],
    pub raw_capabilities: f64,
    pub scaled_capabilities: f64,
    pub overall: f64,
}

impl ExportRow {
    pub fn from_view(view: &AppraisalView) -> Self {
        let evaluation = &view.evaluation;
        let mut capacities = [0.0; 5];
        for (slot, rating) in capacities.iter_mut().zip(&evaluation.behavior_ratings) {
            *slot = rating.points;
        }

        Self {
            instructor: view.instructor.clone(),
            research: evaluation.research,
            university_service: evaluation.university_service,
            community_service: evaluation.community_service,
            teaching_quality: evaluation.teaching_quality,
            raw_performance: evaluation.raw_performance,
            scaled_performance: evaluation.scaled_performance,
            capacities,
            raw_capabilities: evaluation.raw_capabilities,
            scaled_capabilities: evaluation.scaled_capabilities,
            overall: evaluation.overall,
        }
    }

    fn record(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(EXPORT_COLUMNS.len());
        fields.push(self.instructor.clone());
        for value in [
            self.research,
            self.university_service,
            self.community_service,
            self.teaching_quality,
            self.raw_performance,
            self.scaled_performance,
        ] {
            fields.push(format_points(value));
        }
        for value in self.capacities {
            fields.push(format_points(value));
        }
        for value in [
            self.raw_capabilities,
            self.scaled_capabilities,
            self.overall,
        ] {
            fields.push(format_points(value));
        }
        fields
    }
}

fn format_points(value: f64) -> String {
    format!("{value:.2}")
}

/// Serialize scored views as CSV. The header row always matches
/// [`EXPORT_COLUMNS`]; row order follows the input listing.
pub fn write_csv<W: Write>(views: &[AppraisalView], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_COLUMNS)?;

    for view in views {
        csv_writer.write_record(ExportRow::from_view(view).record())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Convenience wrapper producing the CSV document as a string.
pub fn csv_string(views: &[AppraisalView]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(views, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("csv output is utf-8"))
}
