use super::render_options::*;
use crate::core::error::*;

use log::*;
use nom::bytes;
use nom::character;
use nom::combinator;
use nom::multi;
use nom::sequence;
use nom::IResult;
use std::fs;
use std::path::Path;

/// One `key value...` line of a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub line: usize,
    pub key: String,
    pub values: Vec<String>,
}

fn parse_key(s: &str) -> IResult<&str, &str> {
    return bytes::complete::take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(
        s,
    );
}

fn parse_separator(s: &str) -> IResult<&str, ()> {
    return combinator::value(
        (),
        sequence::tuple((
            character::complete::space0,
            combinator::opt(character::complete::char('=')),
            character::complete::space0,
        )),
    )(s);
}

fn parse_value(s: &str) -> IResult<&str, &str> {
    return bytes::complete::take_while1(|c: char| !c.is_whitespace())(s);
}

fn parse_line(s: &str) -> IResult<&str, (&str, Vec<&str>)> {
    let r = combinator::all_consuming(sequence::tuple((
        character::complete::space0,
        parse_key,
        parse_separator,
        multi::separated_list0(character::complete::space1, parse_value),
        character::complete::space0,
    )))(s);
    match r {
        Ok((rest, (_, key, _, values, _))) => {
            return Ok((rest, (key, values)));
        }
        Err(e) => {
            return Err(e);
        }
    }
}

fn remove_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

pub fn parse_config(text: &str) -> Result<Vec<ConfigEntry>, CalaError> {
    let mut entries = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = remove_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok((_, (key, values))) => {
                entries.push(ConfigEntry {
                    line: i + 1,
                    key: key.to_ascii_lowercase(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                });
            }
            Err(_) => {
                let msg = format!("line {}: malformed entry \"{}\"", i + 1, line);
                return Err(CalaError::config(&msg));
            }
        }
    }
    return Ok(entries);
}

fn expect_values<'a>(entry: &'a ConfigEntry, n: usize) -> Result<&'a [String], CalaError> {
    if entry.values.len() != n {
        let msg = format!(
            "line {}: \"{}\" expects {} value(s), got {}",
            entry.line,
            entry.key,
            n,
            entry.values.len()
        );
        return Err(CalaError::config(&msg));
    }
    return Ok(&entry.values);
}

fn parse_number<T: std::str::FromStr>(entry: &ConfigEntry, s: &str) -> Result<T, CalaError> {
    return s.parse::<T>().map_err(|_| {
        let msg = format!(
            "line {}: invalid number \"{}\" for \"{}\"",
            entry.line, s, entry.key
        );
        CalaError::config(&msg)
    });
}

fn parse_switch(entry: &ConfigEntry, s: &str) -> Result<bool, CalaError> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => {
            let msg = format!(
                "line {}: expected on/off for \"{}\", got \"{}\"",
                entry.line, entry.key, s
            );
            Err(CalaError::config(&msg))
        }
    }
}

pub fn apply_config(opt: &mut RenderOptions, entries: &[ConfigEntry]) -> Result<(), CalaError> {
    for entry in entries {
        match entry.key.as_str() {
            "width" => {
                let v = expect_values(entry, 1)?;
                opt.width = parse_number(entry, &v[0])?;
            }
            "height" => {
                let v = expect_values(entry, 1)?;
                opt.height = parse_number(entry, &v[0])?;
            }
            "size" => {
                let v = expect_values(entry, 2)?;
                opt.width = parse_number(entry, &v[0])?;
                opt.height = parse_number(entry, &v[1])?;
            }
            "samples" => {
                let v = expect_values(entry, 1)?;
                opt.samples = parse_number(entry, &v[0])?;
            }
            "time" => {
                let v = expect_values(entry, 2)?;
                opt.time_start = parse_number(entry, &v[0])?;
                opt.time_end = parse_number(entry, &v[1])?;
            }
            "blocksize" | "block-size" | "blksize" => {
                let v = expect_values(entry, 1)?;
                opt.block_size = parse_number(entry, &v[0])?;
            }
            "motion-blur" | "mblur" => {
                let v = expect_values(entry, 1)?;
                opt.set_enabled(RenderFlags::MOTION_BLUR, parse_switch(entry, &v[0])?);
            }
            "dof" | "depth-of-field" => {
                let v = expect_values(entry, 1)?;
                opt.set_enabled(RenderFlags::DEPTH_OF_FIELD, parse_switch(entry, &v[0])?);
            }
            _ => {
                let msg = format!("line {}: unknown option \"{}\"", entry.line, entry.key);
                return Err(CalaError::config(&msg));
            }
        }
    }
    return Ok(());
}

/// Reads a configuration file into `opt`. The result is validated, so a
/// successful load always yields a renderable option set.
pub fn load_config(opt: &mut RenderOptions, path: &Path) -> Result<(), CalaError> {
    let text = fs::read_to_string(path).map_err(|e| {
        let msg = format!("failed to read {}: {}", path.display(), e);
        CalaError::config(&msg)
    })?;
    let entries = parse_config(&text)?;
    apply_config(opt, &entries)?;
    opt.validate()?;
    info!(
        "loaded {} option(s) from {}",
        entries.len(),
        path.display()
    );
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let (_, (k, v)) = parse_line("width 800").unwrap();
        assert_eq!(k, "width");
        assert_eq!(v, vec!["800"]);

        let (_, (k, v)) = parse_line("time = 0   1000").unwrap();
        assert_eq!(k, "time");
        assert_eq!(v, vec!["0", "1000"]);

        let (_, (k, v)) = parse_line("motion-blur").unwrap();
        assert_eq!(k, "motion-blur");
        assert!(v.is_empty());
    }

    #[test]
    fn test_parse_config_skips_comments() {
        let text = "# output\nwidth 320 # pixels\n\n   \nheight 200\n";
        let entries = parse_config(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].line, 2);
        assert_eq!(entries[1].key, "height");
        assert_eq!(entries[1].line, 5);
    }

    #[test]
    fn test_apply_config() {
        let text = "width 320\nheight 200\nsamples 4\ntime 0 500\nblocksize 16\nmotion-blur off\ndof on\n";
        let mut opt = RenderOptions::new();
        apply_config(&mut opt, &parse_config(text).unwrap()).unwrap();
        assert_eq!(opt.width, 320);
        assert_eq!(opt.height, 200);
        assert_eq!(opt.samples, 4);
        assert_eq!(opt.time_start, 0);
        assert_eq!(opt.time_end, 500);
        assert_eq!(opt.block_size, 16);
        assert!(!opt.is_enabled(RenderFlags::MOTION_BLUR));
        assert!(opt.is_enabled(RenderFlags::DEPTH_OF_FIELD));
    }

    #[test]
    fn test_apply_config_errors() {
        let mut opt = RenderOptions::new();
        let e = apply_config(&mut opt, &parse_config("colour red").unwrap()).unwrap_err();
        assert!(e.is_config());
        assert!(e.msg.contains("line 1"));

        let e = apply_config(&mut opt, &parse_config("width wide").unwrap()).unwrap_err();
        assert!(e.msg.contains("invalid number"));

        let e = apply_config(&mut opt, &parse_config("time 5").unwrap()).unwrap_err();
        assert!(e.msg.contains("expects 2"));

        let e = apply_config(&mut opt, &parse_config("dof maybe").unwrap()).unwrap_err();
        assert!(e.msg.contains("on/off"));
    }

    #[test]
    fn test_malformed_line() {
        let e = parse_config("width 10\n!!! 20\n").unwrap_err();
        assert!(e.is_config());
        assert!(e.msg.contains("line 2"));
    }
}
