//! `mazer`: generate a perfect maze, solve it and print both.
//!
//! ```text
//! mazer --width 31 --height 21 --seed 7
//! RUST_LOG=debug mazer -W 12 -H 12 --prune-dead-ends
//! ```

use clap::Parser;
use mazer::{GenConfig, Grid, MazeGen, MazeStats, Solver, render_with_path};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generate and solve a perfect maze.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells (raised to at least 5)
    #[arg(short = 'W', long, default_value_t = 21)]
    width: i32,

    /// Maze height in cells (raised to at least 5)
    #[arg(short = 'H', long, default_value_t = 21)]
    height: i32,

    /// Random seed for a reproducible maze
    #[arg(long)]
    seed: Option<u64>,

    /// Wall off dead ends until only the solution corridor remains
    #[arg(long)]
    prune_dead_ends: bool,

    /// Leave the end marker unlinked when it falls off the carved lattice
    #[arg(long)]
    raw_end: bool,

    /// Print the maze without solving it
    #[arg(long)]
    no_solve: bool,
}

impl Args {
    fn config(&self) -> GenConfig {
        GenConfig {
            prune_dead_ends: self.prune_dead_ends,
            link_end: !self.raw_end,
        }
    }
}

fn build(args: &Args) -> Grid {
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    MazeGen::with_config(StdRng::seed_from_u64(seed), args.config())
        .generate(args.width, args.height)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = build(&args);
    let stats = MazeStats::of(&grid);
    log::info!(
        "{}x{} maze, {} passable cells, {} dead ends, {} region(s)",
        stats.width,
        stats.height,
        stats.passable,
        stats.dead_ends,
        stats.regions
    );

    if args.no_solve {
        print!("{grid}");
        return Ok(());
    }

    let path = Solver::new(&grid)?.solve();
    print!("{}", render_with_path(&grid, &path));
    if path.is_empty() {
        println!("No path found.");
    } else {
        println!("Path found: {} steps.", path.len() - 1);
        log::debug!("route: {}", mazer::render::format_path(&path));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_onto_config() {
        let args = Args::parse_from(["mazer", "-W", "9", "--prune-dead-ends", "--raw-end"]);
        assert_eq!(args.width, 9);
        assert_eq!(args.height, 21);
        assert_eq!(
            args.config(),
            GenConfig {
                prune_dead_ends: true,
                link_end: false
            }
        );
    }

    #[test]
    fn seeded_build_is_reproducible() {
        let args = Args::parse_from(["mazer", "--seed", "11", "-W", "15", "-H", "9"]);
        let a = build(&args);
        let b = build(&args);
        assert_eq!(a, b);
        assert_eq!(a.width(), 15);
        assert_eq!(a.height(), 9);
    }
}
