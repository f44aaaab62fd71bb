//! Builds clap commands from derived meme command specs.

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use memegen_client::OptionValues;
use memegen_core::CommandSpec;
use tracing::warn;

/// Positional ids start with `-`, which no usable option name does.
fn slot_id(index: usize) -> String {
    format!("--slot{index}")
}

/// `help` would shadow clap's own flag, and clap rejects long names that are
/// empty or start with `-`.
fn usable_option(name: &str) -> bool {
    name != "help" && !name.is_empty() && !name.starts_with('-')
}

/// Builds the clap command for `spec`.
///
/// Positional arguments follow the slot order of the spec, required ones
/// first. Each remote option becomes a `--<name> <value>` flag; options
/// clap cannot express are left out.
pub fn build_command(spec: &CommandSpec) -> ClapCommand {
    command_for(spec, true)
}

/// With `strict` unset every positional is optional, so that a bare
/// invocation parses.
fn command_for(spec: &CommandSpec, strict: bool) -> ClapCommand {
    let mut command = ClapCommand::new(spec.name.clone())
        .about(spec.description.clone())
        .after_help(format!("Example:\n  {}", spec.example));
    if let Some(alias) = &spec.alias {
        command = command.visible_alias(alias.clone());
    }

    for (index, slot) in spec.slots.iter().enumerate() {
        command = command.arg(
            Arg::new(slot_id(index))
                .value_name(slot.label())
                .required(strict && slot.required)
                .index(index + 1)
                .action(ArgAction::Set),
        );
    }

    for option in &spec.options {
        if !usable_option(&option.name) {
            warn!(command = %spec.name, option = %option.name, "ignoring unusable option name");
            continue;
        }
        command = command.arg(
            Arg::new(option.name.clone())
                .long(option.name.clone())
                .value_name("value")
                .help(option.description.clone())
                .action(ArgAction::Set),
        );
    }
    command
}

/// Positional arguments and option values of one parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub options: OptionValues,
}

/// Parses `raw` (everything after the command name) against `spec`.
///
/// Supplying no positional arguments at all is always accepted, since that
/// requests the preview. Otherwise the required slots must be filled, and
/// clap rejects anything beyond the last optional slot.
pub fn parse_invocation(spec: &CommandSpec, raw: Vec<String>) -> Result<Invocation, clap::Error> {
    let mut relaxed = command_for(spec, false);
    let matches = relaxed.try_get_matches_from_mut(std::iter::once(spec.name.clone()).chain(raw))?;

    let args = positionals(spec, &matches);
    let required = spec.required_slots().count();
    if !args.is_empty() && args.len() < required {
        let missing = spec
            .slots
            .iter()
            .skip(args.len())
            .filter(|slot| slot.required)
            .map(|slot| slot.placeholder())
            .collect::<Vec<_>>()
            .join(" ");
        return Err(relaxed.error(
            ErrorKind::MissingRequiredArgument,
            format!("missing required arguments: {missing}"),
        ));
    }

    let mut options = OptionValues::unset_for(spec);
    for option in &spec.options {
        if !usable_option(&option.name) {
            continue;
        }
        if let Some(value) = matches.get_one::<String>(&option.name) {
            options.set(option.name.clone(), value.clone());
        }
    }
    Ok(Invocation { args, options })
}

fn positionals(spec: &CommandSpec, matches: &ArgMatches) -> Vec<String> {
    (0..spec.slots.len())
        .map_while(|index| matches.get_one::<String>(&slot_id(index)).cloned())
        .collect()
}
