// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg};
use seamcarve::{
    carve_vertically, codec, dump, CancellationToken, CarveError, EnergyField, OutputFormat,
    PixelGrid,
};
use std::path::Path;
use std::process;
use std::time::Instant;

fn main() {
    env_logger::init();

    let matches = App::new("seamcarve")
        .version("0.1.0")
        .about("Content-aware image narrowing (seam carving)")
        .arg(
            Arg::with_name("INPUT")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("columns")
                .short("n")
                .long("columns")
                .takes_value(true)
                .default_value("1")
                .help("Number of vertical seams to remove"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .default_value("bmp")
                .possible_values(&["bmp", "jpeg", "jpg"])
                .help("Output format"),
        )
        .arg(
            Arg::with_name("no-crop")
                .long("no-crop")
                .help("Keep the original width, leaving the carved columns as a white band"),
        )
        .arg(
            Arg::with_name("energy-map")
                .long("energy-map")
                .takes_value(true)
                .value_name("PATH")
                .help("Also write the initial energy field as a grayscale image"),
        )
        .get_matches();

    let columns: u32 = match matches.value_of("columns").unwrap().parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("--columns takes a positive integer");
            process::exit(2);
        }
    };
    // possible_values guarantees this parses
    let format: OutputFormat = matches.value_of("format").unwrap().parse().unwrap();

    let source = Path::new(matches.value_of("INPUT").unwrap());
    let dest = Path::new(matches.value_of("OUTPUT").unwrap());

    if let Some(map_path) = matches.value_of("energy-map") {
        if let Err(err) = dump_energy(source, Path::new(map_path)) {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }

    let started = Instant::now();
    let token = CancellationToken::new();
    let crop = !matches.is_present("no-crop");

    match carve_vertically(source, columns, dest, format, &token, crop) {
        Ok(()) => log::info!(
            "carved {} columns from {} in {:?}",
            columns,
            source.display(),
            started.elapsed()
        ),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

fn dump_energy(source: &Path, out: &Path) -> Result<(), CarveError> {
    let image = codec::load_rgba(source)?;
    let grid = PixelGrid::from_image(&image);
    let mut field = EnergyField::new(grid.width(), grid.height());
    field.compute_full(&grid);
    dump::energy_to_image(&field, grid.width(), grid.height())
        .save(out)
        .map_err(CarveError::Io)?;
    log::info!("energy map written to {}", out.display());
    Ok(())
}
