use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeopleError {
    #[error("No such file found. Please enter a valid path to the file.")]
    InputNotFound,

    #[error("The CSV file is corrupt.")]
    MalformedTable,

    #[error(
        "Failed to build model. A most probable cause is a failure to cast a table cell into a number. Please ensure that there are no leading zeroes or delimiters in the numbers."
    )]
    NumericConversion,

    #[error("The attribute \"{0}\" could not be found")]
    UnknownAttribute(String),

    #[error("The provided id not present in the group.")]
    UnknownId,

    #[error("Invalid input: exiting program.")]
    UnrecognizedCommand,

    #[error("cannot aggregate over an empty group")]
    EmptyGroup,

    #[error("value overflow")]
    ValueOverflow,
}
