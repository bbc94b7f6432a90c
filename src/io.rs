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

use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::path::Path;

use fnv::FnvHashMap;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::types::MovieRecord;

/// Accepted names for the title column, in order of preference.
pub const TITLE_COLUMNS: &[&str] = &["title", "original_title", "movie_title"];

pub const MOVIES_KEY: &str = "id";
pub const CREDITS_KEY: &str = "movie_id";

const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// An in-memory CSV table, rows have one cell per header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn required_column(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| Error::MissingColumn(name.to_string()))
    }
}

/// Reads a CSV file with a header line, such as the TMDB movies and credits files.
pub fn read_table<P>(path: P) -> Result<Table> where P: AsRef<Path> {
    let file = File::open(path)?;
    table_from_reader(file)
}

pub fn table_from_reader<R>(reader: R) -> Result<Table> where R: std::io::Read {

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }

    Ok(Table { headers, rows })
}

/// Inner join of two tables on `left.left_key == right.right_key`. The result keeps the row order
/// of the left table, and the order of the right table for rows sharing a key. Columns present in
/// both tables get the suffixes `_x` and `_y`, unless they are the shared key column, which is
/// kept once.
pub fn merge_tables(left: &Table, right: &Table, left_key: &str, right_key: &str) -> Result<Table> {

    let left_key_column = left.required_column(left_key)?;
    let right_key_column = right.required_column(right_key)?;

    let shared_key = left_key == right_key;

    let right_columns: Vec<usize> = (0..right.headers.len())
        .filter(|&column| !(shared_key && column == right_key_column))
        .collect();

    let mut headers: Vec<String> = Vec::with_capacity(left.headers.len() + right_columns.len());

    for header in left.headers.iter() {
        let collides = right.column(header).is_some() && !(shared_key && header == left_key);
        if collides {
            headers.push(format!("{}{}", header, LEFT_SUFFIX));
        } else {
            headers.push(header.clone());
        }
    }

    for &column in right_columns.iter() {
        let header = &right.headers[column];
        if left.column(header).is_some() {
            headers.push(format!("{}{}", header, RIGHT_SUFFIX));
        } else {
            headers.push(header.clone());
        }
    }

    let mut right_rows_by_key: FnvHashMap<&str, Vec<usize>> =
        FnvHashMap::with_capacity_and_hasher(right.rows.len(), Default::default());

    for (row_index, row) in right.rows.iter().enumerate() {
        right_rows_by_key.entry(row[right_key_column].as_str())
            .or_insert_with(Vec::new)
            .push(row_index);
    }

    let mut rows = Vec::with_capacity(left.rows.len());

    for left_row in left.rows.iter() {
        if let Some(matches) = right_rows_by_key.get(left_row[left_key_column].as_str()) {
            for &right_row_index in matches {
                let right_row = &right.rows[right_row_index];

                let mut row = left_row.clone();
                row.extend(right_columns.iter().map(|&column| right_row[column].clone()));
                rows.push(row);
            }
        }
    }

    Ok(Table { headers, rows })
}

/// Column holding the movie titles, the first present of `TITLE_COLUMNS`.
pub fn resolve_title_column(table: &Table) -> Result<usize> {
    TITLE_COLUMNS.iter()
        .filter_map(|name| table.column(name))
        .next()
        .ok_or_else(|| Error::MissingTitleColumn(TITLE_COLUMNS.join(", ")))
}

/// The catalog rows of a joined table. Missing overview, cast or crew columns read as empty.
pub fn movie_records(table: &Table) -> Result<Vec<MovieRecord>> {

    let title_column = resolve_title_column(table)?;
    let overview_column = table.column("overview");
    let cast_column = table.column("cast");
    let crew_column = table.column("crew");

    let cell = |row: &Vec<String>, column: Option<usize>| -> String {
        column.map(|column| row[column].clone()).unwrap_or_default()
    };

    let records = table.rows.iter()
        .map(|row| MovieRecord {
            title: row[title_column].clone(),
            overview: cell(row, overview_column),
            cast: cell(row, cast_column),
            crew: cell(row, crew_column),
        })
        .collect();

    Ok(records)
}

/// Reads and joins the movies and credits files and returns the movies in catalog order.
pub fn load_catalog<P, Q>(movies_path: P, credits_path: Q) -> Result<Vec<MovieRecord>>
    where P: AsRef<Path>, Q: AsRef<Path> {

    let movies = read_table(movies_path)?;
    let credits = read_table(credits_path)?;

    info!("Read {} movies and {} credits", movies.rows.len(), credits.rows.len());

    let merged = merge_tables(&movies, &credits, MOVIES_KEY, CREDITS_KEY)?;

    debug!("Merged columns: {:?}", merged.headers);

    let records = movie_records(&merged)?;

    info!("Joined {} movies with their credits", records.len());

    Ok(records)
}

/// Struct used for JSON serialization of recommendations. Field names will be used in JSON.
#[derive(Serialize)]
struct Recommendations<'a> {
    for_item: &'a str,
    recommended_items: &'a [&'a str],
}

/// Output recommendations in JSON format, one movie per line. If an `output_path` is supplied,
/// we write to a file at the specified path, otherwise, we output to stdout.
pub fn write_recommendations<'a, I>(
    recommendations: I,
    output_path: Option<String>,
) -> Result<()>
    where I: IntoIterator<Item=(&'a str, Vec<&'a str>)> {

    let out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout()),
    };

    write_recommendations_to(recommendations, out)
}

pub fn write_recommendations_to<'a, I, W>(recommendations: I, mut out: W) -> Result<()>
    where I: IntoIterator<Item=(&'a str, Vec<&'a str>)>, W: Write {

    for (for_item, recommended_items) in recommendations {
        let line = Recommendations { for_item, recommended_items: &recommended_items };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }

    out.flush()?;

    Ok(())
}

/// Recommendations for every movie of the catalog, in catalog order.
pub fn all_recommendations<'a>(
    catalog: &'a Catalog,
    num_recommendations: usize,
) -> impl Iterator<Item=(&'a str, Vec<&'a str>)> + 'a {

    (0..catalog.len() as u32).map(move |item| {
        let recommended_items = crate::recommend::similar_items(catalog, item, num_recommendations)
            .into_iter()
            .map(|scored_item| catalog.title(scored_item.item))
            .collect();

        (catalog.title(item), recommended_items)
    })
}
