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

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

/// Number of leading cast members that make it into a signature.
pub const NUM_PARTICIPANTS: usize = 3;

pub const DIRECTOR_JOB: &str = "Director";

/// The text signature of a movie: its overview, the names of its leading cast members and the name
/// of its director, separated by single spaces. Cast and crew are lists of records, encoded as JSON
/// (TMDB credits file) or as Python literals (re-exported pandas frames). Lists which are missing or
/// cannot be parsed contribute an empty string, they never fail the signature.
pub fn build_signature(description: &str, cast_records: &str, crew_records: &str) -> String {

    let participants = leading_participants(cast_records);
    let director = director(crew_records);

    format!("{} {} {}", description, participants, director)
}

/// Space-joined names of the first `NUM_PARTICIPANTS` cast members, in the given order.
pub fn leading_participants(cast_records: &str) -> String {

    let cast = parse_records(cast_records);

    let mut names: Vec<&str> = Vec::with_capacity(NUM_PARTICIPANTS);

    // A record without a name ends the extraction, names seen before it are kept
    for member in cast.iter().take(NUM_PARTICIPANTS) {
        match text_field(member, "name") {
            Some(name) => names.push(name),
            None => break,
        }
    }

    names.join(" ")
}

/// Name of the first crew member whose job is exactly `DIRECTOR_JOB`. Records after the director
/// are never looked at.
pub fn director(crew_records: &str) -> String {

    let crew = parse_records(crew_records);

    for member in crew.iter() {
        match text_field(member, "job") {
            Some(job) if job == DIRECTOR_JOB => {
                return text_field(member, "name").unwrap_or_default().to_string()
            },
            Some(_) => continue,
            None => return String::new(),
        }
    }

    String::new()
}

/// String value of `field`, `None` for records which are not objects or lack the field.
fn text_field<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

/// The records of a list, parsed as JSON or, failing that, as a Python literal. Records are kept
/// as raw values so that a malformed record only affects the scan from its position on. Only
/// syntax errors are absorbed here, a malformed list is treated like an absent one.
fn parse_records(raw_records: &str) -> Vec<Value> {

    if raw_records.trim().is_empty() {
        return Vec::new();
    }

    let parsed = serde_json::from_str::<Vec<Value>>(raw_records)
        .or_else(|_| serde_json::from_str::<Vec<Value>>(&python_literal_to_json(raw_records)));

    match parsed {
        Ok(records) => records,
        Err(failure) => {
            debug!("Ignoring malformed record list: {}", failure);
            Vec::new()
        }
    }
}

/// Rewrites a Python literal such as `[{'name': 'Zoe Saldana', 'gender': 1}]` into JSON: strings get
/// double quotes, `True`, `False` and `None` become `true`, `false` and `null`. Anything else is
/// copied as is and left for the JSON parser to reject.
fn python_literal_to_json(literal: &str) -> String {

    let mut json = String::with_capacity(literal.len() + 16);
    let mut chars = literal.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => copy_string(c, &mut chars, &mut json),
            c if c.is_alphabetic() => {
                let mut word = c.to_string();
                while let Some(&next) = chars.peek() {
                    if !(next.is_alphanumeric() || next == '_') {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }

                match word.as_str() {
                    "True" => json.push_str("true"),
                    "False" => json.push_str("false"),
                    "None" => json.push_str("null"),
                    _ => json.push_str(&word),
                }
            },
            _ => json.push(c),
        }
    }

    json
}

/// Copies a Python string literal up to its closing `quote` as a JSON string.
fn copy_string(quote: char, chars: &mut Peekable<Chars>, json: &mut String) {

    json.push('"');

    while let Some(c) = chars.next() {
        match c {
            c if c == quote => break,
            '\\' => match chars.next() {
                Some('\'') => json.push('\''),
                Some('x') => {
                    let hex: String = chars.by_ref().take(2).collect();
                    json.push_str("\\u00");
                    json.push_str(&hex);
                },
                Some(escaped) => {
                    json.push('\\');
                    json.push(escaped);
                },
                None => json.push('\\'),
            },
            '"' => json.push_str("\\\""),
            _ => json.push(c),
        }
    }

    json.push('"');
}


#[cfg(test)]
mod tests {

    use super::*;

    const CAST: &str = r#"[
        {"cast_id": 242, "character": "Jake Sully", "name": "Sam Worthington", "order": 0},
        {"cast_id": 3, "character": "Neytiri", "name": "Zoe Saldana", "order": 1},
        {"cast_id": 25, "character": "Dr. Grace Augustine", "name": "Sigourney Weaver", "order": 2},
        {"cast_id": 4, "character": "Col. Quaritch", "name": "Stephen Lang", "order": 3}
    ]"#;

    const CREW: &str = r#"[
        {"department": "Editing", "job": "Editor", "name": "Stephen E. Rivkin"},
        {"department": "Directing", "job": "Director", "name": "James Cameron"},
        {"department": "Directing", "job": "Director", "name": "Someone Else"}
    ]"#;

    #[test]
    fn first_three_participants_in_order() {
        assert_eq!(leading_participants(CAST), "Sam Worthington Zoe Saldana Sigourney Weaver");
    }

    #[test]
    fn fewer_than_three_participants() {
        assert_eq!(leading_participants(r#"[{"name": "Kate Winslet"}]"#), "Kate Winslet");
        assert_eq!(leading_participants("[]"), "");
        assert_eq!(leading_participants(""), "");
    }

    #[test]
    fn nameless_record_ends_participants() {
        let cast = r#"[{"name": "A"}, {"character": "B"}, {"name": "C"}]"#;
        assert_eq!(leading_participants(cast), "A");
    }

    #[test]
    fn first_director_wins() {
        assert_eq!(director(CREW), "James Cameron");
    }

    #[test]
    fn director_match_is_case_sensitive() {
        let crew = r#"[{"job": "director", "name": "Nobody"}, {"job": "Director", "name": "Jim"}]"#;
        assert_eq!(director(crew), "Jim");

        let crew = r#"[{"job": "Co-Director", "name": "Nobody"}]"#;
        assert_eq!(director(crew), "");
    }

    #[test]
    fn jobless_record_ends_director_scan() {
        let crew = r#"[{"name": "Nobody"}, {"job": "Director", "name": "Jim"}]"#;
        assert_eq!(director(crew), "");
    }

    #[test]
    fn python_literal_records() {
        let cast = "[{'cast_id': 242, 'name': 'Sam Worthington'}, {'name': 'Zoe Saldana'}]";
        assert_eq!(leading_participants(cast), "Sam Worthington Zoe Saldana");

        let crew = "[{'job': 'Director', 'name': 'James Cameron'}]";
        assert_eq!(director(crew), "James Cameron");
    }

    #[test]
    fn python_literal_quoting_and_constants() {
        let cast = r#"[{'name': "Dolores O'Riordan", 'adult': False, 'profile_path': None},
            {'name': 'Ren\xe9e \'Zell\' Say "hi"', 'adult': True}]"#;
        assert_eq!(leading_participants(cast), "Dolores O'Riordan Ren\u{e9}e 'Zell' Say \"hi\"");
    }

    #[test]
    fn malformed_record_after_the_third_participant() {
        let cast = r#"[{"name": "A"}, {"name": "B"}, {"name": "C"}, 5]"#;
        assert_eq!(leading_participants(cast), "A B C");

        let cast = "[{'name': 'A'}, 'B', {'name': 'C'}]";
        assert_eq!(leading_participants(cast), "A");
    }

    #[test]
    fn malformed_record_after_the_director() {
        let crew = r#"[{"job": "Director", "name": "James Cameron"}, 42]"#;
        assert_eq!(director(crew), "James Cameron");

        let crew = r#"[42, {"job": "Director", "name": "James Cameron"}]"#;
        assert_eq!(director(crew), "");
    }

    #[test]
    fn full_signature() {
        let signature = build_signature("A marine on an alien planet", CAST, CREW);
        assert_eq!(
            signature,
            "A marine on an alien planet Sam Worthington Zoe Saldana Sigourney Weaver James Cameron"
        );
    }

    #[test]
    fn malformed_records_degrade_to_empty_segments() {
        let signature = build_signature("A ship sinks", "[{'name': broken", "not even a list");
        assert_eq!(signature, format!("{} {} {}", "A ship sinks", "", ""));

        let signature = build_signature("A ship sinks", r#"{"name": "Kate"}"#, "42");
        assert_eq!(signature, "A ship sinks  ");
    }

    #[test]
    fn missing_everything() {
        assert_eq!(build_signature("", "", ""), "  ");
    }
}
