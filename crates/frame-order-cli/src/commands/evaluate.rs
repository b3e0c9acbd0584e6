use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use frameorder::core::frame_order::print_frame_order_matrix;
use frameorder::engine::data::ObservationKind;
use frameorder::engine::target::TargetFunction;
use frameorder::workflows::Problem;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let problem = Problem::load(&args.problem)?;
    let params = match (&args.params, &problem.params) {
        (Some(params), _) | (None, Some(params)) => params.clone(),
        (None, None) => {
            return Err(CliError::Argument(
                "no parameter vector given on the command line or in the problem file".into(),
            ));
        }
    };

    let mut target = problem.target_function()?;
    let chi2 = target.evaluate(&params)?;
    info!(chi2, "Evaluation finished.");

    let mut stdout = io::stdout().lock();
    write_report(&target, chi2, args.show_matrix, &mut stdout)
}

fn write_report<W: Write>(
    target: &TargetFunction,
    chi2: f64,
    show_matrix: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Model: {}", target.model())?;
    writeln!(out, "Chi-squared: {chi2:.6e}")?;

    if show_matrix {
        writeln!(out, "\nFrame order matrix:")?;
        print_frame_order_matrix(target.frame_order_matrix(), out)?;
    }

    for (i, name) in target.media_names().enumerate() {
        let reduced = target.reduced_tensors()[i].to_array();
        writeln!(out, "\nMedium '{name}'")?;
        writeln!(
            out,
            "  Reduced tensor: [{}]",
            reduced.map(|a| format!("{a:.6e}")).join(", ")
        )?;

        for kind in [ObservationKind::Rdc, ObservationKind::Pcs] {
            let (Some(set), Some(back)) =
                (target.observations(i, kind), target.back_calculated(i, kind))
            else {
                continue;
            };
            writeln!(out, "  {kind}: {:>6} {:>14} {:>14}", "spin", "observed", "back-calc")?;
            for (j, calc) in back.iter().enumerate() {
                if set.is_missing(j) {
                    writeln!(out, "  {kind}: {j:>6} {:>14} {:>14}", "-", "-")?;
                } else {
                    writeln!(
                        out,
                        "  {kind}: {j:>6} {:>14.6e} {calc:>14.6e}",
                        set.values()[j]
                    )?;
                }
            }
        }
    }
    Ok(())
}
