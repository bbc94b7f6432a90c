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

#[cfg(test)]
mod tests {

    use crate::{build_catalog, recommend, Error, MovieRecord};
    use crate::io;

    fn movies() -> Vec<MovieRecord> {
        let cameron = r#"[{"job": "Director", "name": "James Cameron"}]"#;

        vec![
            MovieRecord::new(
                "Avatar",
                "A marine on an alien planet",
                r#"[{"name": "Sam Worthington"}]"#,
                cameron,
            ),
            MovieRecord::new(
                "Alien",
                "A crew on an alien planet fights a creature",
                r#"[{"name": "Sigourney Weaver"}]"#,
                cameron,
            ),
            MovieRecord::new(
                "Titanic",
                "A ship sinks",
                r#"[{"name": "Kate Winslet"}]"#,
                cameron,
            ),
        ]
    }

    #[test]
    fn programmatic_usage() {

        /* Our input is a list of movies in catalog order. Each movie has a title, a free text
           overview and the JSON encoded cast and crew lists from the TMDB credits file. */
        let movies = movies();

        /* Building the catalog derives a text signature per movie, learns TF-IDF vectors and
           computes the similarities between all pairs of movies, using two threads here. */
        let catalog = build_catalog(movies, 2).unwrap();

        /* The catalog can now be queried by title. Avatar shares "alien", "planet" and its
           director with Alien, but only the director with Titanic. */
        let recommendations = recommend(&catalog, "Avatar", 2).unwrap();
        assert_eq!(recommendations, vec!["Alien", "Titanic"]);

        /* Unknown titles are reported as such, instead of as an empty list. */
        match recommend(&catalog, "Nonexistent Movie", 5) {
            Err(Error::TitleNotFound(_)) => println!("Movie not found in database"),
            other => panic!("expected TitleNotFound, got {:?}", other),
        }
    }

    #[test]
    fn exactly_min_of_k_and_catalog_size() {
        let catalog = build_catalog(movies(), 1).unwrap();

        for k in 0..6 {
            for title in catalog.titles() {
                let recommendations = recommend(&catalog, title, k).unwrap();
                assert_eq!(recommendations.len(), k.min(catalog.len() - 1));
                assert!(!recommendations.contains(&title.as_str()));
            }
        }
    }

    #[test]
    fn malformed_cast_does_not_fail_the_build() {
        let mut movies = movies();
        movies[2].cast = String::from("[{'name': 'Kate Winslet'");
        movies[2].crew = String::from("{{{");

        let catalog = build_catalog(movies, 2).unwrap();

        // Titanic only keeps "ship" and "sinks", which no other movie shares
        assert_eq!(recommend(&catalog, "Titanic", 2).unwrap(), vec!["Avatar", "Alien"]);
        assert_eq!(catalog.similarities(0)[2], 0.0);
    }

    #[test]
    fn repeated_builds_agree() {
        let mut movies = movies();
        movies.push(movies[2].clone());
        movies[3].title = String::from("Titanic (Remastered)");

        let first = build_catalog(movies.clone(), 1).unwrap();
        let second = build_catalog(movies, 4).unwrap();

        for title in first.titles() {
            assert_eq!(recommend(&first, title, 3).unwrap(), recommend(&second, title, 3).unwrap());
        }

        // Textually identical signatures keep their catalog order
        assert_eq!(
            recommend(&first, "Alien", 3).unwrap(),
            vec!["Avatar", "Titanic", "Titanic (Remastered)"]
        );
    }

    #[test]
    fn empty_catalog() {
        assert!(matches!(build_catalog(Vec::new(), 2), Err(Error::EmptyVocabulary)));

        let stop_words_only = vec![MovieRecord::new("The", "the of and", "", "")];
        assert!(matches!(build_catalog(stop_words_only, 2), Err(Error::EmptyVocabulary)));
    }

    #[test]
    fn from_csv_to_recommendations() {
        let movies = io::table_from_reader("\
id,title,original_title,overview
1,Avatar,Avatar,A marine on an alien planet
2,Alien,Alien,A crew on an alien planet fights a creature
3,Titanic,Titanic,A ship sinks
".as_bytes()).unwrap();

        let credits = io::table_from_reader(r#"movie_id,title,cast,crew
3,Titanic,"[{""name"": ""Kate Winslet""}]","[{""job"": ""Director"", ""name"": ""James Cameron""}]"
2,Alien,"[{""name"": ""Sigourney Weaver""}]","[{""job"": ""Director"", ""name"": ""James Cameron""}]"
1,Avatar,"[{""name"": ""Sam Worthington""}]","[{""job"": ""Director"", ""name"": ""James Cameron""}]"
"#.as_bytes()).unwrap();

        let merged = io::merge_tables(&movies, &credits, io::MOVIES_KEY, io::CREDITS_KEY).unwrap();
        let catalog = build_catalog(io::movie_records(&merged).unwrap(), 2).unwrap();

        let mut out: Vec<u8> = Vec::new();
        io::write_recommendations_to(io::all_recommendations(&catalog, 1), &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out).unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["for_item"], "Avatar");
        assert_eq!(lines[0]["recommended_items"], serde_json::json!(["Alien"]));
        assert_eq!(lines[1]["recommended_items"], serde_json::json!(["Avatar"]));
    }
}
