/**
 * CineReco
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

extern crate cinereco;
extern crate getopts;
extern crate num_cpus;
extern crate tracing_subscriber;

use std::env;
use std::error::Error;
use std::process;

use getopts::Options;
use tracing_subscriber::EnvFilter;

use cinereco::io;

const DEFAULT_NUM_RECOMMENDATIONS: usize = 5;
const USAGE_EXIT_CODE: i32 = 2;

fn main() {

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("m", "movies", "Movies file name (required). CSV file with a header line, an 'id' \
        column, a title column ('title', 'original_title' or 'movie_title') and an 'overview' \
        column.", "PATH");
    opts.optopt("c", "credits", "Credits file name (required). CSV file with a header line, a \
        'movie_id' column and the JSON encoded 'cast' and 'crew' of each movie.", "PATH");
    opts.optopt("t", "title", "Title of the movie to compute recommendations for.", "TITLE");
    opts.optflag("a", "all", "Compute recommendations for all movies instead of a single title.");
    opts.optopt("n", "num-recommendations", "Number of recommendations per movie (optional, \
        defaults to 5).", "NUMBER");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optopt("p", "threads", "Number of threads for the similarity computation (optional, \
        defaults to the number of CPUs).", "NUMBER");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    let (movies_path, credits_path) = match (matches.opt_str("m"), matches.opt_str("c")) {
        (Some(movies_path), Some(credits_path)) => (movies_path, credits_path),
        _ => return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify the input files via --movies and --credits."),
        ),
    };

    let title = matches.opt_str("t");
    let all = matches.opt_present("a");

    if title.is_none() && !all {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify a movie via --title, or use --all."),
        );
    }

    if title.is_some() && all {
        return print_usage_and_exit(
            &program,
            opts,
            Some("The options --title and --all cannot be combined."),
        );
    }

    let n: usize = match matches.opt_get_default("n", DEFAULT_NUM_RECOMMENDATIONS) {
        Ok(n) => n,
        Err(failure) => {
            let hint = format!("Problem with option 'n': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let pool_size: usize = match matches.opt_get_default("p", num_cpus::get()) {
        Ok(pool_size) => pool_size,
        Err(failure) => {
            let hint = format!("Problem with option 'p': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let output_path = matches.opt_str("o");

    if let Err(failure) = compute_recommendations(
        &movies_path,
        &credits_path,
        title.as_ref().map(String::as_str),
        n,
        pool_size,
        output_path,
    ) {
        eprintln!("{}", failure);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));

    if hint.is_some() {
        process::exit(USAGE_EXIT_CODE);
    }
}

/// Recommendations for a single title if one is given, otherwise for the whole catalog.
fn compute_recommendations(
    movies_path: &str,
    credits_path: &str,
    title: Option<&str>,
    n: usize,
    pool_size: usize,
    output_path: Option<String>,
) -> Result<(), Box<dyn Error>> {

    let movies = io::load_catalog(movies_path, credits_path)?;
    let catalog = cinereco::build_catalog(movies, pool_size)?;

    match title {
        Some(title) => {
            let recommendations = cinereco::recommend(&catalog, title, n)?;
            io::write_recommendations(vec![(title, recommendations)], output_path)?;
        },
        None => {
            io::write_recommendations(io::all_recommendations(&catalog, n), output_path)?;
        },
    }

    Ok(())
}
