//! Parameter listing command.

use clap::Args;
use attacca_core::ParameterInfo;
use attacca_effects::TransientDesigner;

use super::common::format_value;

#[derive(Args)]
pub struct ParamsArgs {
    /// Only list parameters in this group (io, attack, sustain, psychoacoustic, shape, clipper)
    #[arg(short, long)]
    group: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let designer = TransientDesigner::default();
    let mut current_group = None;
    let mut shown = 0;

    for index in 0..designer.param_count() {
        let Some(desc) = designer.param_info(index) else {
            continue;
        };
        if args
            .group
            .as_deref()
            .is_some_and(|g| !g.eq_ignore_ascii_case(desc.group))
        {
            continue;
        }
        if current_group != Some(desc.group) {
            if current_group.is_some() {
                println!();
            }
            println!("[{}]", desc.group);
            current_group = Some(desc.group);
        }

        let range = if desc.is_stepped() {
            desc.labels.join(" | ")
        } else {
            format!("{} .. {}", format_value(&desc, desc.min), format_value(&desc, desc.max))
        };
        println!(
            "  {:24} {:28} default {}",
            desc.string_id,
            range,
            format_value(&desc, desc.default)
        );
        shown += 1;
    }

    if shown == 0
        && let Some(group) = args.group
    {
        anyhow::bail!("No parameter group named '{group}'");
    }
    Ok(())
}
