use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    formatting::TimezoneCatalog,
};

/// Browses the timezone catalogue.
///
/// Without arguments prints every region with its zone count; with a region
/// prints that region's identifiers and labels.
pub struct AvailableCommand {
    catalog: TimezoneCatalog,
}

impl AvailableCommand {
    /// Creates a new AvailableCommand over `catalog`.
    pub fn new(catalog: TimezoneCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Command for AvailableCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let Some(region) = args.first() else {
            let lines: Vec<String> = self
                .catalog
                .groups()
                .map(|(region, zones)| format!("{region} ({})", zones.len()))
                .collect();
            return Ok(lines.join("\n"));
        };

        let zones = self.catalog.region(region).ok_or_else(|| {
            CliError::InvalidArguments(format!("Unknown timezone region '{region}'"))
        })?;

        let lines: Vec<String> = zones
            .iter()
            .map(|option| format!("{}  {}", option.id, option.label))
            .collect();

        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "available".to_string(),
            description: "List known timezones by region".to_string(),
            category: "timezone".to_string(),
            args: vec![CommandArg {
                name: "region".to_string(),
                description: "Region to expand (e.g., Europe)".to_string(),
                required: false,
                value_type: ArgType::Timezone,
            }],
            examples: vec![
                "worldclock timezone available".to_string(),
                "worldclock timezone available Europe".to_string(),
            ],
        }
    }
}
