use crate::cli::MatrixArgs;
use crate::error::{CliError, Result};
use frameorder::core::frame_order::{self, print_frame_order_matrix};
use frameorder::core::models::{ModelGeometry, MotionModel, ParamLayout};
use frameorder::core::numerics::QuadratureSettings;
use frameorder::engine::error::EngineError;
use std::io::{self, Write};
use tracing::{debug, info};

pub fn run(args: MatrixArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_matrix(&args, &mut stdout)
}

fn write_matrix<W: Write>(args: &MatrixArgs, out: &mut W) -> Result<()> {
    let model: MotionModel = args.model.parse().map_err(EngineError::from)?;
    let layout = ParamLayout::new(model, false, false);
    let values = layout.unpack(&args.params).map_err(|e| {
        let names: Vec<_> = layout.names().iter().map(|n| n.as_str()).collect();
        CliError::Argument(format!("{e} (expected: {})", names.join(", ")))
    })?;
    debug!(?values, "Unpacked model parameters.");

    let mut geometry = ModelGeometry::from_params(model, &values).map_err(EngineError::from)?;
    if args.eigenframe {
        geometry = ModelGeometry::in_eigenframe(geometry.domain);
    }
    info!(model = %model, eigenframe = args.eigenframe, "Compiling frame order matrix.");

    let matrix = frame_order::compile(&geometry, &QuadratureSettings::default());
    writeln!(out, "Frame order matrix ({model}):")?;
    print_frame_order_matrix(&matrix, out)?;
    Ok(())
}
