//! Builders for match rows in tests. Rows are written out as CSV and read back
//! through the real loader.

use crate::models::MatchRecord;
use crate::services::parse_matches;

pub(crate) struct Row {
    id: String,
    date: String,
    home: String,
    away: String,
    status: String,
    season: String,
    cells: Vec<(String, String)>,
}

pub(crate) fn row(id: &str, home: &str, away: &str) -> Row {
    Row {
        id: id.to_string(),
        date: String::new(),
        home: home.to_string(),
        away: away.to_string(),
        status: "finished".to_string(),
        season: "2024".to_string(),
        cells: Vec::new(),
    }
}

impl Row {
    pub(crate) fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub(crate) fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub(crate) fn season(mut self, season: &str) -> Self {
        self.season = season.to_string();
        self
    }

    pub(crate) fn cell(mut self, column: &str, value: &str) -> Self {
        self.cells.push((column.to_string(), value.to_string()));
        self
    }

    fn value(&self, column: &str) -> &str {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map_or("", |(_, v)| v.as_str())
    }
}

pub(crate) fn load(rows: Vec<Row>) -> Vec<MatchRecord> {
    let mut columns: Vec<String> = Vec::new();
    for r in &rows {
        for (column, _) in &r.cells {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["Match ID", "Date", "Home Team", "Away Team", "Status", "Season"];
    header.extend(columns.iter().map(String::as_str));
    writer.write_record(&header).unwrap();

    for r in &rows {
        let mut record = vec![
            r.id.as_str(),
            r.date.as_str(),
            r.home.as_str(),
            r.away.as_str(),
            r.status.as_str(),
            r.season.as_str(),
        ];
        record.extend(columns.iter().map(|c| r.value(c)));
        writer.write_record(&record).unwrap();
    }

    let bytes = writer.into_inner().unwrap();
    parse_matches(&String::from_utf8(bytes).unwrap()).unwrap()
}
