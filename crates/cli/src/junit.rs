// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! JUnit XML serialization of the report suite.
//!
//! One `<testsuite>` holds one `<testcase>` per executed check; each case
//! carries zero or more `<skipped>`/`<error>`/`<failure>` entries with the
//! finding text as element content. A written report reloaded as a prior
//! run reproduces identical case entries.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::check::{CaseResult, ResultKind};
use crate::error::{Error, Result};
use crate::report::{Stats, Suite, TestCase};

fn stats_attrs(el: &mut BytesStart<'_>, stats: Stats) {
    el.push_attribute(("tests", stats.tests.to_string().as_str()));
    el.push_attribute(("failures", stats.failures.to_string().as_str()));
    el.push_attribute(("errors", stats.errors.to_string().as_str()));
    el.push_attribute(("skipped", stats.skipped.to_string().as_str()));
}

/// Serialize the suite to `path`, computing statistics first.
pub fn write_report(path: &Path, suite: &Suite) -> Result<()> {
    let stats = suite.statistics();
    let mut buf = Vec::new();
    let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| Error::Report(e.to_string()))?;

    let mut suites_el = BytesStart::new("testsuites");
    stats_attrs(&mut suites_el, stats);
    write_start(&mut writer, suites_el)?;

    let mut suite_el = BytesStart::new("testsuite");
    suite_el.push_attribute(("name", suite.name.as_str()));
    stats_attrs(&mut suite_el, stats);
    write_start(&mut writer, suite_el)?;

    for case in &suite.cases {
        let mut case_el = BytesStart::new("testcase");
        case_el.push_attribute(("name", case.name.as_str()));
        case_el.push_attribute(("classname", case.classname.as_str()));

        if case.results.is_empty() {
            write_empty(&mut writer, case_el)?;
            continue;
        }
        write_start(&mut writer, case_el)?;
        for res in &case.results {
            let mut res_el = BytesStart::new(res.kind.element());
            res_el.push_attribute(("message", res.message.as_str()));
            res_el.push_attribute(("type", res.type_attr.as_str()));
            if res.text.is_empty() {
                write_empty(&mut writer, res_el)?;
            } else {
                write_start(&mut writer, res_el)?;
                writer
                    .write_event(Event::Text(BytesText::new(&res.text)))
                    .map_err(|e| Error::Report(e.to_string()))?;
                write_end(&mut writer, res.kind.element())?;
            }
        }
        write_end(&mut writer, "testcase")?;
    }

    write_end(&mut writer, "testsuite")?;
    write_end(&mut writer, "testsuites")?;
    buf.push(b'\n');

    fs::write(path, buf).map_err(|e| Error::io(path, e))
}

fn write_start(writer: &mut Writer<&mut Vec<u8>>, el: BytesStart<'_>) -> Result<()> {
    writer
        .write_event(Event::Start(el))
        .map_err(|e| Error::Report(e.to_string()))
}

fn write_empty(writer: &mut Writer<&mut Vec<u8>>, el: BytesStart<'_>) -> Result<()> {
    writer
        .write_event(Event::Empty(el))
        .map_err(|e| Error::Report(e.to_string()))
}

fn write_end(writer: &mut Writer<&mut Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::Report(e.to_string()))
}

type FileReader = Reader<BufReader<fs::File>>;

fn attr_value(el: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in el.attributes() {
        let attr = attr.map_err(|e| Error::Report(e.to_string()))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Report(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Load the first testsuite of a previously written report.
pub fn load_suite(path: &Path) -> Result<Suite> {
    let mut reader = Reader::from_file(path).map_err(|e| Error::Report(e.to_string()))?;
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::Report(e.to_string()))?
        {
            Event::Start(el) if el.name().as_ref() == b"testsuite" => {
                let name = attr_value(&el, b"name")?.unwrap_or_else(|| "Compliance".to_string());
                return read_suite(&mut reader, name);
            }
            Event::Eof => {
                return Err(Error::Report(format!(
                    "no testsuite found in {}",
                    path.display()
                )));
            }
            _ => {}
        }
        buf.clear();
    }
}

fn read_suite(reader: &mut FileReader, name: String) -> Result<Suite> {
    let mut suite = Suite::new(name);
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::Report(e.to_string()))?
        {
            Event::Start(el) if el.name().as_ref() == b"testcase" => {
                let case = start_case(&el)?;
                suite.cases.push(read_case(reader, case)?);
            }
            Event::Empty(el) if el.name().as_ref() == b"testcase" => {
                suite.cases.push(start_case(&el)?);
            }
            Event::End(el) if el.name().as_ref() == b"testsuite" => break,
            Event::Eof => {
                return Err(Error::Report("unexpected end of report".to_string()));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(suite)
}

fn start_case(el: &BytesStart<'_>) -> Result<TestCase> {
    Ok(TestCase {
        name: attr_value(el, b"name")?.unwrap_or_default(),
        classname: attr_value(el, b"classname")?.unwrap_or_default(),
        results: Vec::new(),
    })
}

fn read_case(reader: &mut FileReader, mut case: TestCase) -> Result<TestCase> {
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::Report(e.to_string()))?
        {
            Event::Start(el) => match ResultKind::from_element(
                String::from_utf8_lossy(el.name().as_ref()).as_ref(),
            ) {
                Some(kind) => {
                    let result = start_result(&el, kind)?;
                    case.results.push(read_result_text(reader, result)?);
                }
                None => {
                    // Ignore elements we do not model (system-out etc.)
                    let end = el.to_end().into_owned();
                    let mut skip = Vec::new();
                    reader
                        .read_to_end_into(end.name(), &mut skip)
                        .map_err(|e| Error::Report(e.to_string()))?;
                }
            },
            Event::Empty(el) => {
                if let Some(kind) = ResultKind::from_element(
                    String::from_utf8_lossy(el.name().as_ref()).as_ref(),
                ) {
                    case.results.push(start_result(&el, kind)?);
                }
            }
            Event::End(el) if el.name().as_ref() == b"testcase" => break,
            Event::Eof => {
                return Err(Error::Report("unexpected end of report".to_string()));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(case)
}

fn start_result(el: &BytesStart<'_>, kind: ResultKind) -> Result<CaseResult> {
    Ok(CaseResult {
        kind,
        message: attr_value(el, b"message")?.unwrap_or_default(),
        type_attr: attr_value(el, b"type")?.unwrap_or_default(),
        text: String::new(),
    })
}

fn read_result_text(reader: &mut FileReader, mut result: CaseResult) -> Result<CaseResult> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::Report(e.to_string()))?
        {
            Event::Text(t) => {
                text.push_str(
                    &t.unescape()
                        .map_err(|e| Error::Report(e.to_string()))?,
                );
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::Report("unexpected end of report".to_string()));
            }
            _ => {}
        }
        buf.clear();
    }
    result.text = text;
    Ok(result)
}

#[cfg(test)]
#[path = "junit_tests.rs"]
mod tests;
