//! NGFC, a Neo Geo ROM set converter for SDRAM-based flash cartridges.

#![deny(missing_docs)]
#![deny(unused)]
#![deny(warnings)]
#![deny(unsafe_code)]

use std::path::Path;
use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use ngfc::config::Profile;
use ngfc::container;
use ngfc::error::Errors;
use ngfc::header::RegionCode;
use ngfc::load;

/// Convert Neo Geo ROM sets to the NGFC format for flash cart use.
#[derive(StructOpt)]
#[structopt(name = "ngfc", after_help = "Example: ngfc convert mslug.zip mslug.ngfc")]
enum Command {
  /// Convert a ROM set to NGFC.
  Convert {
    /// Input ROM set (directory, .zip archive, or .neo file).
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// Output NGFC file.
    #[structopt(parse(from_os_str))]
    output: PathBuf,
    /// NGH number of the game.
    #[structopt(long)]
    ngh: Option<u32>,
    /// Hardware region to record (jp, us or eu).
    #[structopt(long)]
    region: Option<RegionCode>,
    /// Mark the source ROMs as having been encrypted.
    #[structopt(long)]
    encrypted: bool,
    /// JSON5 profile supplying defaults for the options above.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
  },
  /// Verify an NGFC file.
  Verify {
    /// NGFC file to verify.
    #[structopt(parse(from_os_str))]
    file: PathBuf,
  },
  /// Show NGFC file information.
  Info {
    /// NGFC file to examine.
    #[structopt(parse(from_os_str))]
    file: PathBuf,
  },
}

fn main() {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();

  match Command::from_args() {
    Command::Convert {
      input,
      output,
      ngh,
      region,
      encrypted,
      config,
    } => {
      require_exists(&input, "input");
      let cli = Profile {
        ngh,
        region,
        encrypted,
      };
      let profile = match config {
        Some(path) => match Profile::load(&path) {
          Ok(file) => file.merge(cli),
          Err(e) => Errors::one(e).dump_and_die(1),
        },
        None => cli,
      };
      convert(&input, &output, &profile);
    }
    Command::Verify { file } | Command::Info { file } => {
      require_exists(&file, "file");
      verify(&file);
    }
  }
}

fn require_exists(path: &Path, what: &str) {
  if !path.exists() {
    eprintln!("error: {} not found: {}", what, path.display());
    process::exit(1);
  }
}

fn convert(input: &Path, output: &Path, profile: &Profile) {
  log::info!("converting: {}", input.display());
  log::info!("output: {}", output.display());

  let roms = match load::load(input) {
    Ok(roms) => roms,
    Err(errors) => errors.dump_and_die(1),
  };

  let result = container::convert(roms, profile.ngh_number(), profile.flags())
    .and_then(|c| c.save(output).map(|_| c.summary()));
  match result {
    Ok(summary) => println!("{}", summary),
    Err(e) => Errors::one(e).dump_and_die(1),
  }
}

fn verify(path: &Path) {
  match container::verify(path) {
    Ok(report) => println!("{}", report),
    Err(e) => Errors::one(e).dump_and_die(1),
  }
}
