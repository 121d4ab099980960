//! Plain-text instance readers.

use std::str::FromStr;

use thiserror::Error;

use crate::error::RoutingError;
use crate::models::{Customer, Instance};

/// Errors raised while reading an instance file.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("input has no header line")]
    MissingHeader,

    #[error("line {line}: expected {expected} field(s), found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("expected {expected} record line(s), found {found}")]
    MissingRecords { expected: usize, found: usize },

    #[error("line {line}: negative demand {demand}")]
    NegativeDemand { line: usize, demand: i64 },

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// Non-blank lines with their 1-based line numbers, split on whitespace.
fn records(input: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
}

fn fields<'s, const N: usize>(line: usize, record: &[&'s str]) -> Result<[&'s str; N], ParseError> {
    <[&str; N]>::try_from(record).map_err(|_| ParseError::FieldCount {
        line,
        expected: N,
        found: record.len(),
    })
}

fn number<T: FromStr>(line: usize, raw: &str) -> Result<T, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: raw.to_string(),
    })
}

fn coordinate(line: usize, raw: &str) -> Result<f64, ParseError> {
    let value: f64 = number(line, raw)?;
    if !value.is_finite() {
        return Err(ParseError::InvalidNumber {
            line,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn demand(line: usize, raw: &str) -> Result<u32, ParseError> {
    let demand: i64 = number(line, raw)?;
    u32::try_from(demand).map_err(|_| {
        if demand < 0 {
            ParseError::NegativeDemand { line, demand }
        } else {
            ParseError::InvalidNumber {
                line,
                value: raw.to_string(),
            }
        }
    })
}

/// Reads a CVRP instance.
///
/// The first line is `customer_count vehicle_count capacity`, followed by
/// `customer_count` lines of `demand x y` in index order, starting with the
/// depot. Blank lines are skipped and lines past the last record ignored.
///
/// # Examples
///
/// ```
/// use u_cvrp::io::parse_instance;
///
/// let instance = parse_instance("3 2 10\n0 0 0\n3 1.5 0\n4 0 2\n").unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.vehicle_count(), 2);
/// assert_eq!(instance.capacity(), 10);
/// assert_eq!(instance.customer(2).demand(), 4);
/// ```
pub fn parse_instance(input: &str) -> Result<Instance, ParseError> {
    let mut lines = records(input);
    let (line, header) = lines.next().ok_or(ParseError::MissingHeader)?;
    let [count, vehicles, capacity] = fields::<3>(line, &header)?;
    let count: usize = number(line, count)?;
    let vehicles: usize = number(line, vehicles)?;
    let capacity: u32 = number(line, capacity)?;

    let mut customers = Vec::new();
    for (index, (line, record)) in lines.take(count).enumerate() {
        let [d, x, y] = fields::<3>(line, &record)?;
        customers.push(Customer::new(
            index,
            demand(line, d)?,
            coordinate(line, x)?,
            coordinate(line, y)?,
        ));
    }
    if customers.len() < count {
        return Err(ParseError::MissingRecords {
            expected: count,
            found: customers.len(),
        });
    }

    Ok(Instance::new(customers, vehicles, capacity)?)
}

/// Reads a single-vehicle tour instance.
///
/// The first line is the point count `N`, followed by `N` lines of `x y`.
/// The first point becomes the depot.
///
/// # Examples
///
/// ```
/// use u_cvrp::io::parse_tour;
///
/// let instance = parse_tour("3\n0 0\n0 1\n1 1\n").unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.vehicle_count(), 1);
/// ```
pub fn parse_tour(input: &str) -> Result<Instance, ParseError> {
    let mut lines = records(input);
    let (line, header) = lines.next().ok_or(ParseError::MissingHeader)?;
    let [count] = fields::<1>(line, &header)?;
    let count: usize = number(line, count)?;

    let mut points = Vec::new();
    for (line, record) in lines.take(count) {
        let [x, y] = fields::<2>(line, &record)?;
        points.push((coordinate(line, x)?, coordinate(line, y)?));
    }
    if points.len() < count {
        return Err(ParseError::MissingRecords {
            expected: count,
            found: points.len(),
        });
    }

    Ok(Instance::tour(&points)?)
}
