//! Integration tests for the processor module
//!
//! Tests the complete pipeline on small catalog files written to temp dirs.

pub mod partitioning;

use std::path::{Path, PathBuf};

pub const HEADER: &str = "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

/// Write `rows` under the catalog header and return the file path
pub fn write_catalog(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("raw").join("titles.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    std::fs::write(&path, content).unwrap();
    path
}

/// A mixed catalog of movies and shows with assorted quality problems
pub fn sample_rows() -> Vec<&'static str> {
    vec![
        r#"s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,"September 25, 2021",2020,PG-13,90 min,Documentaries,"As her father nears the end of his life, filmmaker Kirsten Johnson stages his death.""#,
        r#"s2,TV Show,Blood & Water,,"Ama Qamata, Khosi Ngema",South Africa,"September 24, 2021",2021,TV-MA,2 Seasons,"International TV Shows, TV Dramas","After crossing paths at a party, a Cape Town teen sets out to prove whether a private-school swimming star is her sister.""#,
        r#"s3,TV Show,Ganglands,Julien Leclercq,"Sami Bouajila, Tracy Gotoas",,"September 24, 2021",2021,  TV-MA ,1 Season,"Crime TV Shows, International TV Shows",To protect his family from a powerful drug lord."#,
        r#"s4,Movie,My Little Pony: A New Generation,"Robert Cullen, José Luis Ucha","Vanessa Hudgens, Kimiko Glenn",,garbage,2021,74 min,91 min,Children & Family Movies,"#,
        r#"s1,Movie,Dick Johnson Is Dead (again),,,,,,,,,"#,
        r#"s5,Movie,,Someone,,,"April 1, 2020",2019,R,100 min,Dramas,No title here"#,
    ]
}
