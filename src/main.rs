use docopt::Docopt;
use rand::{self, SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use shiftmaze::{
    renderers,
    session::{Session, SessionOptions},
    units::{CellPixels, Height, Width},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Shiftmaze

Usage:
    shiftmaze_driver -h | --help
    shiftmaze_driver [--grid-width=<w> --grid-height=<h>] [--seed=<s>] [--flips=<n>] [--show-path] [--mark-start-end] [--text-out=<path>] [--image-out=<path> --cell-pixels=<n>]

Options:
    -h --help            Show this screen.
    --grid-width=<w>     The grid width in a w*h grid [default: 20].
    --grid-height=<h>    The grid height in a w*h grid [default: 20].
    --seed=<s>           Unsigned integer seed for the random generator, for a reproducible maze.
    --flips=<n>          Reroute the solution n times after generating by flipping one passage each time [default: 0].
    --show-path          Overlay the solution path from the entrance to the goal.
    --mark-start-end     Mark the entrance '@' (player) and goal 'E' cells.
    --text-out=<path>    Output file path for a textual rendering of the maze. Defaults to stdout.
    --image-out=<path>   Output file path for a PNG rendering of the maze.
    --cell-pixels=<n>    Pixel count to render one cell in the image [default: 20].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u32>,
    flag_flips: usize,
    flag_show_path: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            MazeFailure(::shiftmaze::maze::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let rng = match args.flag_seed {
        // XorShift seeds must not be all zero.
        Some(seed) => XorShiftRng::from_seed([seed | 1,
                                              seed.wrapping_mul(0x9e37_79b9),
                                              seed.rotate_left(13),
                                              0x85eb_ca6b]),
        None => rand::weak_rng(),
    };

    let mut session_options = SessionOptions::new(Width(args.flag_grid_width),
                                                  Height(args.flag_grid_height));
    session_options.scramble_flips = args.flag_flips;
    let session: Session<u32, XorShiftRng> = Session::new(session_options, rng)?;

    let path = if args.flag_show_path {
        session.solution()
    } else {
        None
    };
    let (player, goal) = if args.flag_mark_start_end {
        (Some(session.player()), Some(session.goal()))
    } else {
        (None, None)
    };
    let render_options = renderers::RenderOptionsBuilder::new()
        .path(path)
        .player(player)
        .goal(goal)
        .cell_pixels(CellPixels(usize::from(args.flag_cell_pixels)))
        .build();

    if !args.flag_image_out.is_empty() {
        let image = renderers::render_image(session.maze(), &render_options);
        renderers::save_png(&image, Path::new(&args.flag_image_out))
            .chain_err(|| format!("Failed to write maze image to {}", args.flag_image_out))?;
    } else {
        let rendered = renderers::render_text(session.maze(), &render_options);
        if args.flag_text_out.is_empty() {
            println!("{}", rendered);
        } else {
            write_text_to_file(&rendered, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
