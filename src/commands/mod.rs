//! Pattern-dispatch recognizers for report groups
//!
//! Each group recognizer implements the two-method [`Command`] contract:
//! `can_parse` gates on the token's shape, `execute` extracts the values into
//! the weather container. A supplier holds a fixed, priority-ordered list of
//! recognizers and returns the first whose `can_parse` matches.
//!
//! The ordering of each supplier's list is load-bearing: more specific
//! patterns (wind shear) must precede more general ones (plain wind) that
//! would otherwise match a suffix of the same token. The order is an
//! invariant of the constructors below and is covered by tests.

use crate::Result;
use crate::models::{Metar, WeatherContainer};

pub mod common;
pub mod metar;
pub mod remark;
pub mod taf;

pub use remark::RemarkParser;

/// A recognizer for one weather group shape, accumulating into the shared
/// weather container.
pub trait Command {
    /// Whether the token structurally matches this recognizer.
    fn can_parse(&self, token: &str) -> bool;

    /// Decode the token into the container. Returns whether the token was
    /// consumed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedToken`](crate::Error::UnexpectedToken) when
    /// invoked on a token `can_parse` would have rejected, or
    /// [`Error::UnknownCode`](crate::Error::UnknownCode) when an enumerated
    /// sub-value inside a matching token fails to decode.
    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool>;
}

/// A recognizer for a METAR-only group, accumulating into the report itself
/// (altimeter, temperatures, runway records).
pub trait MetarCommand {
    fn can_parse(&self, token: &str) -> bool;

    fn execute(&self, metar: &mut Metar, token: &str) -> Result<bool>;
}

/// Priority-ordered supplier of the generic weather-body recognizers shared
/// by METAR and TAF bodies and by every trend group.
pub struct CommandSupplier {
    commands: Vec<Box<dyn Command>>,
}

impl CommandSupplier {
    pub fn new() -> Self {
        Self {
            // Wind shear before wind: both match a WSddd/ prefix token tail.
            commands: vec![
                Box::new(common::WindShearCommand::new()),
                Box::new(common::WindCommand::new()),
                Box::new(common::WindVariationCommand::new()),
                Box::new(common::MainVisibilityCommand::new()),
                Box::new(common::MainVisibilityMilesCommand::new()),
                Box::new(common::MinimalVisibilityCommand::new()),
                Box::new(common::VerticalVisibilityCommand::new()),
                Box::new(common::CloudCommand::new()),
            ],
        }
    }

    /// First recognizer whose `can_parse` accepts the token.
    pub fn get(&self, token: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.can_parse(token))
            .map(|command| command.as_ref())
    }
}

impl Default for CommandSupplier {
    fn default() -> Self {
        Self::new()
    }
}

/// Priority-ordered supplier of METAR-only group recognizers.
pub struct MetarCommandSupplier {
    commands: Vec<Box<dyn MetarCommand>>,
}

impl MetarCommandSupplier {
    pub fn new() -> Self {
        Self {
            commands: vec![
                Box::new(metar::AltimeterCommand::new()),
                Box::new(metar::AltimeterMercuryCommand::new()),
                Box::new(metar::TemperatureCommand::new()),
                Box::new(metar::RunwayCommand::new()),
            ],
        }
    }

    pub fn get(&self, token: &str) -> Option<&dyn MetarCommand> {
        self.commands
            .iter()
            .find(|command| command.can_parse(token))
            .map(|command| command.as_ref())
    }
}

impl Default for MetarCommandSupplier {
    fn default() -> Self {
        Self::new()
    }
}

/// Priority-ordered supplier of TAF-only group recognizers.
pub struct TafCommandSupplier {
    commands: Vec<Box<dyn Command>>,
}

impl TafCommandSupplier {
    pub fn new() -> Self {
        Self {
            commands: vec![
                Box::new(taf::TurbulenceCommand::new()),
                Box::new(taf::IcingCommand::new()),
            ],
        }
    }

    pub fn get(&self, token: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.can_parse(token))
            .map(|command| command.as_ref())
    }
}

impl Default for TafCommandSupplier {
    fn default() -> Self {
        Self::new()
    }
}
