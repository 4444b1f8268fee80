use crate::{
    errors::PeopleError,
    group::Group,
    models::{Attribute, build_model},
    printer::{render_table, separator},
    processor::{Operator, Shortest, evaluate},
    table::Table,
};
use anyhow::Result;
use log::{debug, info};
use std::io::Write;

/// Every data row must hold `id,name,age,weight`.
pub const EXPECTED_COLUMNS: usize = 4;

const STARTUP_ATTRIBUTE: Attribute = Attribute::Age;

const MENU: &str = r#"Type "table" to show data
or "average" before an attribute to show the average
or "min" before an attribute to show the minimum
or "max" before an attribute to show the maximum
or "model" to print all person objects
or the id of a person object to print it
or "exit" to quit the program.

"#;

pub const PROMPT: &str = "mode> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Table,
    Model,
    Aggregate(Operator, String),
    Lookup(String),
}

impl Command {
    /// Matches one line of input against the fixed command forms.
    ///
    /// The line is trimmed and split on single spaces, so doubled spaces
    /// produce empty tokens and never match.
    pub fn parse(line: &str) -> Result<Self, PeopleError> {
        let tokens: Vec<&str> = line.trim().split(' ').collect();
        let command = match tokens.as_slice() {
            ["exit"] => Command::Exit,
            ["table"] => Command::Table,
            ["model"] => Command::Model,
            ["average", attr] => Command::Aggregate(Operator::Average, attr.to_string()),
            ["min", attr] => Command::Aggregate(Operator::Min, attr.to_string()),
            ["max", attr] => Command::Aggregate(Operator::Max, attr.to_string()),
            [id] if !id.is_empty() && id.chars().all(char::is_numeric) => {
                Command::Lookup(id.to_string())
            }
            _ => return Err(PeopleError::UnrecognizedCommand),
        };
        Ok(command)
    }
}

/// The parsed table together with the people built from it.
pub struct Session {
    table: Table,
    group: Group,
}

impl Session {
    /// Parses, validates and converts raw CSV text.
    pub fn load(raw: &str) -> Result<Self, PeopleError> {
        let table = Table::parse(raw);
        if !table.validate(Some(EXPECTED_COLUMNS)) {
            return Err(PeopleError::MalformedTable);
        }
        let group = Group::new(build_model(table.data_rows())?);

        Ok(Session { table, group })
    }

    /// Writes the table, the startup aggregates and the menu.
    pub fn write_report(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", render_table(&self.table))?;
        write!(out, "{}", separator())?;

        let people = self.group.people();
        for operator in [Operator::Average, Operator::Min, Operator::Max] {
            let value = evaluate(people, STARTUP_ATTRIBUTE, operator)?;
            writeln!(
                out,
                "The {} {STARTUP_ATTRIBUTE} is {}",
                operator.label(),
                Shortest(value)
            )?;
        }
        writeln!(out)?;
        write!(out, "{}", separator())?;
        write!(out, "{MENU}")?;

        Ok(())
    }

    pub fn execute(&self, command: &Command, out: &mut impl Write) -> Result<()> {
        info!("executing {command:?}");
        match command {
            Command::Exit => writeln!(out)?,
            Command::Table => write!(out, "{}", render_table(&self.table))?,
            Command::Model => {
                for person in self.group.people() {
                    writeln!(out, "{person}")?;
                }
                write!(out, "{}", separator())?;
            }
            Command::Aggregate(operator, attr) => {
                let attribute: Attribute = attr.parse()?;
                let value = evaluate(self.group.people(), attribute, *operator)?;
                debug!("{} of {attribute} is {value}", operator.label());
                let label = operator.label();
                match operator {
                    Operator::Min | Operator::Max => {
                        writeln!(out, "The {label} {attr} is {value:.2}")?
                    }
                    Operator::Sum | Operator::Average => {
                        writeln!(out, "The {label} {attr} is {}", Shortest(value))?
                    }
                }
                if *operator == Operator::Max {
                    write!(out, "{}", separator())?;
                }
            }
            Command::Lookup(id) => {
                let person = self.group.find_by_id(id)?;
                writeln!(out, "{person}\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "id,name,age,weight\n1,Alice,30,60\n2,Bob,25,80\n3,Carol,40,70\n";

    fn run(line: &str) -> Result<String> {
        let session = Session::load(DATA)?;
        let mut out = Vec::new();
        session.execute(&Command::parse(line)?, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn error_of(res: Result<String>) -> Option<PeopleError> {
        res.err()?.downcast::<PeopleError>().ok()
    }

    #[test]
    fn test_parse_fixed_forms() -> Result<()> {
        assert_eq!(Command::parse("exit")?, Command::Exit);
        assert_eq!(Command::parse("  table \n")?, Command::Table);
        assert_eq!(Command::parse("model")?, Command::Model);
        assert_eq!(
            Command::parse("average age")?,
            Command::Aggregate(Operator::Average, "age".to_string())
        );
        assert_eq!(
            Command::parse("min weight")?,
            Command::Aggregate(Operator::Min, "weight".to_string())
        );
        assert_eq!(
            Command::parse("max height")?,
            Command::Aggregate(Operator::Max, "height".to_string())
        );
        assert_eq!(Command::parse("42")?, Command::Lookup("42".to_string()));
        Ok(())
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for line in [
            "average",
            "average  age",
            "average age extra",
            "exit now",
            "Table",
            "",
            "4 2",
            "1a",
            "-1",
        ] {
            assert!(
                matches!(Command::parse(line), Err(PeopleError::UnrecognizedCommand)),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_load_rejects_wrong_column_count() {
        let res = Session::load("id,name,age,weight\n1,Alice,30");
        assert!(matches!(res, Err(PeopleError::MalformedTable)));
    }

    #[test]
    fn test_load_rejects_header_only() {
        let res = Session::load("id,name,age,weight\n");
        assert!(matches!(res, Err(PeopleError::MalformedTable)));
    }

    #[test]
    fn test_load_rejects_bad_number() {
        let res = Session::load("id,name,age,weight\n1,Alice,3a,60");
        assert!(matches!(res, Err(PeopleError::NumericConversion)));
    }

    #[test]
    fn test_execute_exit_prints_empty_line() -> Result<()> {
        assert_eq!(run("exit")?, "\n");
        Ok(())
    }

    #[test]
    fn test_execute_table() -> Result<()> {
        let output = run("table")?;
        assert!(output.starts_with("-------------------------\n|id |name  |age |weight |\n"));
        assert!(output.ends_with("|3  |Carol |40  |70     |\n-------------------------\n\n"));
        Ok(())
    }

    #[test]
    fn test_execute_model_prints_everyone() -> Result<()> {
        let output = run("model")?;
        assert_eq!(output.matches("Person(").count(), 3);
        assert!(output.starts_with("Person(\tid=1,\n\tname=Alice,\n\tage=30,\n\tweight=60\n)\n"));
        assert!(output.ends_with(&separator()));
        Ok(())
    }

    #[test]
    fn test_execute_average_keeps_full_precision() -> Result<()> {
        assert_eq!(run("average age")?, "The average age is 31.666666666666668\n");
        assert_eq!(run("average weight")?, "The average weight is 70.0\n");
        Ok(())
    }

    #[test]
    fn test_execute_min_max_use_two_decimals() -> Result<()> {
        assert_eq!(run("min age")?, "The minimum age is 25.00\n");
        assert_eq!(
            run("max weight")?,
            format!("The maximum weight is 80.00\n{}", separator())
        );
        Ok(())
    }

    #[test]
    fn test_execute_unknown_attribute() {
        for line in ["average name", "min id", "max height"] {
            let attr = line.split(' ').nth(1).unwrap_or_default();
            let err = error_of(run(line));
            assert!(matches!(
                &err,
                Some(PeopleError::UnknownAttribute(found)) if found == attr
            ));
            assert_eq!(
                err.map(|e| e.to_string()),
                Some(format!("The attribute \"{attr}\" could not be found"))
            );
        }
    }

    #[test]
    fn test_execute_lookup() -> Result<()> {
        assert_eq!(
            run("2")?,
            "Person(\tid=2,\n\tname=Bob,\n\tage=25,\n\tweight=80\n)\n\n"
        );
        assert!(matches!(error_of(run("9")), Some(PeopleError::UnknownId)));
        Ok(())
    }

    #[test]
    fn test_write_report() -> Result<()> {
        let session = Session::load(DATA)?;
        let mut out = Vec::new();
        session.write_report(&mut out)?;
        let report = String::from_utf8(out)?;

        let aggregates = "\
The average age is 31.666666666666668
The minimum age is 25.0
The maximum age is 40.0

";
        assert!(report.contains(&format!("{}{aggregates}{}", separator(), separator())));
        assert!(report.ends_with("or \"exit\" to quit the program.\n\n"));
        Ok(())
    }
}
