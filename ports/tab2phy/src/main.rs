mod cmds;

use autophylip_ports_lib::{
    configure_logger, error_kind, exit_with_error, expose_runtime_arguments,
    CliLauncher,
};
use tracing::debug;

fn main() {
    let args = CliLauncher::<cmds::convert::Arguments>::parse_as(
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_DESCRIPTION"),
    );

    // ? -----------------------------------------------------------------------
    // ? Configure logger
    // ? -----------------------------------------------------------------------

    let guard =
        match configure_logger(args.log_level, args.log_file, args.log_format) {
            Ok(guard) => guard,
            Err(err) => exit_with_error(err),
        };

    // ? -----------------------------------------------------------------------
    // ? Get command line arguments
    // ? -----------------------------------------------------------------------

    expose_runtime_arguments();

    // ? -----------------------------------------------------------------------
    // ? Run the conversion
    // ? -----------------------------------------------------------------------

    let result = cmds::convert::convert_tabfiles_cmd(args.opts);

    if let Err(err) = &result {
        debug!(kind = error_kind(err), "{err:#}");
    }

    drop(guard);

    if let Err(err) = result {
        exit_with_error(err);
    }
}
