//! Preset commands: list, show, copy and paths.

use anyhow::Context;
use attacca_config::{
    ParamValue, Preset, ensure_user_presets_dir, factory_presets, get_factory_preset,
    list_user_presets, preset_name_from_path, system_presets_dir, user_presets_dir, validate_param,
};
use attacca_core::ParameterInfo;
use attacca_effects::TransientDesigner;
use clap::{Args, Subcommand};

use super::common::{format_value, load_preset};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// Print built-in and user presets with their descriptions
    List {
        /// Built-in presets only
        #[arg(long, conflicts_with = "user")]
        factory: bool,

        /// Presets from the user directory only
        #[arg(long)]
        user: bool,
    },

    /// Print every value a preset sets, resolved to display units
    Show {
        /// Built-in name, user preset name, or TOML path
        name: String,
    },

    /// Write a built-in preset into the user directory as an editable file
    Copy {
        /// Built-in preset name
        source: String,

        /// Name of the new file, without extension
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the directories searched for presets
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => {
            if !user {
                list_factory();
            }
            if !user && !factory {
                println!();
            }
            if !factory {
                list_user();
            }
            Ok(())
        }
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Copy { source, name } => copy_preset(&source, name.as_deref()),
        PresetsCommand::Paths => {
            println!("User presets:   {}", user_presets_dir().display());
            println!("System presets: {}", system_presets_dir().display());
            Ok(())
        }
    }
}

fn row(name: &str, detail: &str) {
    println!("  {name:18} {detail}");
}

fn list_factory() {
    println!("Factory presets:");
    for preset in factory_presets() {
        row(&preset.name, preset.description.as_deref().unwrap_or(""));
    }
}

fn list_user() {
    println!("User presets ({}):", user_presets_dir().display());
    let paths = list_user_presets();
    if paths.is_empty() {
        println!("  (none)");
    }
    for path in paths {
        let stem = preset_name_from_path(&path).unwrap_or_default();
        match Preset::load(&path) {
            Ok(preset) => row(&stem, preset.description.as_deref().unwrap_or("")),
            Err(e) => row(&stem, &format!("(error: {e})")),
        }
    }
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let designer = TransientDesigner::default();

    println!("{}", preset.name);
    if let Some(desc) = &preset.description {
        println!("  {desc}");
    }
    println!();

    if preset.is_empty() {
        println!("  (all parameters at their defaults)");
        return Ok(());
    }
    for (key, value) in &preset.params {
        println!("  {:24} {}", key, describe(&designer, key, value));
    }
    Ok(())
}

/// Resolved display form of a stored value, or the validation error.
fn describe(designer: &TransientDesigner, key: &str, value: &ParamValue) -> String {
    match validate_param(designer, key, value) {
        Ok((index, plain)) => designer
            .param_info(index)
            .map_or_else(|| value.to_string(), |desc| format_value(&desc, plain)),
        Err(e) => format!("{value}  (invalid: {e})"),
    }
}

fn copy_preset(source: &str, name: Option<&str>) -> anyhow::Result<()> {
    let preset = get_factory_preset(source)
        .with_context(|| format!("No built-in preset named '{source}'"))?;
    let path = ensure_user_presets_dir()?.join(format!("{}.toml", name.unwrap_or(source)));
    anyhow::ensure!(
        !path.exists(),
        "{} already exists; pick another name with --name",
        path.display()
    );
    preset.save(&path)?;
    println!("Copied '{}' to {}", preset.name, path.display());
    Ok(())
}
