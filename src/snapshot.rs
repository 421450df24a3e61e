use thiserror::Error;

pub const FIELD_COUNT: usize = 7;

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "load_average",
    "memory_total",
    "memory_used",
    "disk_total",
    "disk_used",
    "net_capacity",
    "net_usage",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub load_average: f64,
    pub memory_total: u64,
    pub memory_used: u64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub net_capacity: u64,
    pub net_usage: u64,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected 7 comma-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("field {index} ({name}) is not numeric: {value:?}")]
    Numeric {
        index: usize,
        name: &'static str,
        value: String,
    },
    #[error("field {index} ({name}) must be positive")]
    ZeroTotal { index: usize, name: &'static str },
}

impl Snapshot {
    pub fn decode(body: &str) -> Result<Self, DecodeError> {
        let fields: Vec<&str> = body.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(DecodeError::FieldCount {
                found: fields.len(),
            });
        }

        let snapshot = Self {
            load_average: parse_load(fields[0])?,
            memory_total: parse_count(2, fields[1])?,
            memory_used: parse_count(3, fields[2])?,
            disk_total: parse_count(4, fields[3])?,
            disk_used: parse_count(5, fields[4])?,
            net_capacity: parse_count(6, fields[5])?,
            net_usage: parse_count(7, fields[6])?,
        };

        for (index, value) in [
            (2, snapshot.memory_total),
            (4, snapshot.disk_total),
            (6, snapshot.net_capacity),
        ] {
            if value == 0 {
                return Err(DecodeError::ZeroTotal {
                    index,
                    name: FIELD_NAMES[index - 1],
                });
            }
        }

        Ok(snapshot)
    }
}

fn parse_load(raw: &str) -> Result<f64, DecodeError> {
    let value: f64 = raw.parse().map_err(|_| numeric_error(1, raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(numeric_error(1, raw));
    }
    Ok(value)
}

fn parse_count(index: usize, raw: &str) -> Result<u64, DecodeError> {
    raw.parse::<u64>().map_err(|_| numeric_error(index, raw))
}

fn numeric_error(index: usize, raw: &str) -> DecodeError {
    DecodeError::Numeric {
        index,
        name: FIELD_NAMES[index - 1],
        value: raw.to_string(),
    }
}
