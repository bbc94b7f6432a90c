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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed cast and crew lists never show up here, the signature builder degrades them to
/// empty strings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Movie not found in database: {0}")]
    TitleNotFound(String),

    #[error("Empty vocabulary, the signatures only contain stop words")]
    EmptyVocabulary,

    #[error("No movie title column found, expected one of: {0}")]
    MissingTitleColumn(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
