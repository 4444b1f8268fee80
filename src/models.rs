use crate::{errors::PeopleError, traits::Attributes};
use anyhow::Result;
use csv::StringRecord;
use getset::{Getters, Setters};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};

/// The numeric attributes of a [`Person`] that can be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Age,
    Weight,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Age, Attribute::Weight];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Age => "age",
            Attribute::Weight => "weight",
        }
    }
}

impl FromStr for Attribute {
    type Err = PeopleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| PeopleError::UnknownAttribute(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of person data. The id is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters, Setters)]
pub struct Person {
    #[getset(get = "pub")]
    id: String,
    #[getset(get = "pub", set = "pub")]
    name: String,
    #[getset(get = "pub", set = "pub")]
    #[serde(deserialize_with = "base10")]
    age: i64,
    #[getset(get = "pub", set = "pub")]
    #[serde(deserialize_with = "base10")]
    weight: i64,
}

/// Parses a plain base-10 integer: an optional `-`, then digits with no
/// leading zero unless the number is `0` itself.
pub fn parse_base10(cell: &str) -> Option<i64> {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    cell.parse().ok()
}

fn base10<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = String::deserialize(deserializer)?;
    parse_base10(&cell)
        .ok_or_else(|| de::Error::custom(format!("{cell:?} is not a base-10 integer")))
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: i64, weight: i64) -> Self {
        Person {
            id: id.into(),
            name: name.into(),
            age,
            weight,
        }
    }

    /// Adds a period in years to the person's age.
    ///
    /// # Arguments
    /// * `years` - The number of years to add.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    pub fn age_verb(&mut self, years: i64) -> Result<()> {
        self.age = self
            .age
            .checked_add(years)
            .ok_or(PeopleError::ValueOverflow)?;
        Ok(())
    }

    /// Adds a gain to the person's weight.
    ///
    /// # Arguments
    /// * `gain` - The weight to add.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    pub fn gain_weight(&mut self, gain: i64) -> Result<()> {
        self.weight = self
            .weight
            .checked_add(gain)
            .ok_or(PeopleError::ValueOverflow)?;
        Ok(())
    }

    pub fn greeting(&self) -> String {
        let first_name = self.name.split(' ').next().unwrap_or_default();
        format!("Hello {first_name}")
    }
}

impl Attributes for Person {
    fn attribute(&self, attribute: Attribute) -> i64 {
        match attribute {
            Attribute::Age => self.age,
            Attribute::Weight => self.weight,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person(\tid={},\n\tname={},\n\tage={},\n\tweight={}\n)",
            self.id, self.name, self.age, self.weight
        )
    }
}

/// Builds one person per data row laid out as `id,name,age,weight`.
///
/// Any cell that does not convert aborts the whole build.
pub fn build_model(data_rows: &[Vec<String>]) -> Result<Vec<Person>, PeopleError> {
    let people = data_rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            StringRecord::from(row.clone())
                .deserialize::<Person>(None)
                .map_err(|e| {
                    warn!("data row {} could not be converted: {e}", idx + 1);
                    PeopleError::NumericConversion
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("built {} people", people.len());

    Ok(people)
}
