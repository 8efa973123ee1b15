// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary plugin bundles for tests.

use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use quick_xml::escape::escape;
use sleuth_core::BundleLocation;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Smallest module the loader accepts as a detector.
pub const DETECTOR_MODULE: &str = r#"(module (func (export "run")))"#;

#[derive(Debug, Default)]
struct CatalogSpec {
    file: String,
    patterns: Vec<(String, Vec<(String, String)>)>,
    codes: Vec<(Option<String>, String)>,
}

/// Builder for a plugin bundle written to a temp directory.
///
/// Catalog entries go to the catalog selected with [`BundleBuilder::catalog`],
/// `messages.xml` when none was selected. No catalog file is written unless
/// one is selected or receives an entry.
#[derive(Debug, Default)]
pub struct BundleBuilder {
    detectors: Vec<(String, Option<String>)>,
    bug_patterns: Vec<(String, String, String)>,
    catalogs: Vec<CatalogSpec>,
    current_catalog: Option<usize>,
    modules: Vec<(String, String)>,
    files: Vec<(String, Vec<u8>)>,
    omit_descriptor: bool,
}

impl BundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a detector and ship a valid module for it.
    pub fn detector(mut self, class_name: &str, disabled: Option<&str>) -> Self {
        self.modules
            .push((class_name.to_string(), DETECTOR_MODULE.to_string()));
        self.declared_detector(class_name, disabled)
    }

    /// Declare a detector without shipping any code for it.
    pub fn declared_detector(mut self, class_name: &str, disabled: Option<&str>) -> Self {
        self.detectors
            .push((class_name.to_string(), disabled.map(str::to_string)));
        self
    }

    /// Ship a module in WebAssembly text form under the class-path location of `class_name`.
    pub fn module(mut self, class_name: &str, wat: &str) -> Self {
        self.modules.push((class_name.to_string(), wat.to_string()));
        self
    }

    pub fn bug_pattern(mut self, bug_type: &str, abbrev: &str, category: &str) -> Self {
        self.bug_patterns
            .push((bug_type.to_string(), abbrev.to_string(), category.to_string()));
        self
    }

    /// Select (creating if needed) the catalog file subsequent entries go to.
    pub fn catalog(mut self, file: &str) -> Self {
        self.select_catalog(file);
        self
    }

    /// Full message entry for `bug_type`.
    pub fn message(self, bug_type: &str, short: &str, long: &str, details: &str) -> Self {
        self.message_fields(
            bug_type,
            &[
                ("ShortDescription", short),
                ("LongDescription", long),
                ("Details", details),
            ],
        )
    }

    /// Message entry with an arbitrary set of child elements.
    pub fn message_fields(mut self, bug_type: &str, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string()))
            .collect();
        self.current_catalog_mut()
            .patterns
            .push((bug_type.to_string(), fields));
        self
    }

    pub fn bug_code(mut self, abbrev: &str, description: &str) -> Self {
        self.current_catalog_mut()
            .codes
            .push((Some(abbrev.to_string()), description.to_string()));
        self
    }

    /// A `BugCode` element with no `abbrev` attribute at all.
    pub fn bug_code_without_abbrev(mut self, description: &str) -> Self {
        self.current_catalog_mut()
            .codes
            .push((None, description.to_string()));
        self
    }

    /// Write an arbitrary file relative to the bundle root.
    pub fn file(self, relative: &str, content: &str) -> Self {
        self.file_bytes(relative, content.as_bytes())
    }

    /// Write an arbitrary file with raw content, e.g. a non-UTF-8 catalog.
    pub fn file_bytes(mut self, relative: &str, content: &[u8]) -> Self {
        self.files.push((relative.to_string(), content.to_vec()));
        self
    }

    /// Leave `findbugs.xml` out of the bundle.
    pub fn without_descriptor(mut self) -> Self {
        self.omit_descriptor = true;
        self
    }

    /// Write the bundle to a fresh temp directory.
    pub fn build(self) -> std::io::Result<TestBundle> {
        let dir = tempfile::tempdir()?;
        for (relative, content) in self.entries() {
            write_file(dir.path(), &relative, &content)?;
        }

        let location = BundleLocation::from_path(dir.path());
        Ok(TestBundle { dir, location })
    }

    /// Pack the bundle into a zip archive named `file_name` inside a fresh
    /// temp directory. The bundle location points at the archive.
    pub fn build_archive(self, file_name: &str) -> std::io::Result<TestBundle> {
        let dir = tempfile::tempdir()?;
        let archive = dir.path().join(file_name);

        let mut writer = ZipWriter::new(File::create(&archive)?);
        for (relative, content) in self.entries() {
            writer
                .start_file(relative, SimpleFileOptions::default())
                .map_err(std::io::Error::other)?;
            writer.write_all(&content)?;
        }
        writer.finish().map_err(std::io::Error::other)?;

        let location = BundleLocation::from_path(archive);
        Ok(TestBundle { dir, location })
    }

    /// Every file of the bundle as `(relative path, content)`.
    ///
    /// A later entry for the same path replaces an earlier one, so
    /// [`BundleBuilder::file`] can override generated documents.
    fn entries(&self) -> Vec<(String, Vec<u8>)> {
        let mut generated = Vec::new();
        if !self.omit_descriptor {
            generated.push(("findbugs.xml".to_string(), self.descriptor_xml().into_bytes()));
        }
        for catalog in &self.catalogs {
            generated.push((catalog.file.clone(), catalog_xml(catalog).into_bytes()));
        }
        for (class_name, wat) in &self.modules {
            generated.push((
                format!("{}.wat", class_name.replace('.', "/")),
                wat.clone().into_bytes(),
            ));
        }

        let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
        for (path, content) in generated.into_iter().chain(self.files.iter().cloned()) {
            entries.retain(|(existing, _)| *existing != path);
            entries.push((path, content));
        }
        entries
    }

    fn select_catalog(&mut self, file: &str) -> usize {
        let index = match self.catalogs.iter().position(|c| c.file == file) {
            Some(index) => index,
            None => {
                self.catalogs.push(CatalogSpec {
                    file: file.to_string(),
                    ..CatalogSpec::default()
                });
                self.catalogs.len() - 1
            }
        };
        self.current_catalog = Some(index);
        index
    }

    fn current_catalog_mut(&mut self) -> &mut CatalogSpec {
        let index = match self.current_catalog {
            Some(index) => index,
            None => self.select_catalog("messages.xml"),
        };
        &mut self.catalogs[index]
    }

    fn descriptor_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<FindbugsPlugin>\n");
        for (class_name, disabled) in &self.detectors {
            xml.push_str(&format!("  <Detector class=\"{}\"", escape(class_name.as_str())));
            if let Some(disabled) = disabled {
                xml.push_str(&format!(" disabled=\"{}\"", escape(disabled.as_str())));
            }
            xml.push_str("/>\n");
        }
        for (bug_type, abbrev, category) in &self.bug_patterns {
            xml.push_str(&format!(
                "  <BugPattern type=\"{}\" abbrev=\"{}\" category=\"{}\"/>\n",
                escape(bug_type.as_str()),
                escape(abbrev.as_str()),
                escape(category.as_str())
            ));
        }
        xml.push_str("</FindbugsPlugin>\n");
        xml
    }
}

fn catalog_xml(catalog: &CatalogSpec) -> String {
    let mut xml =
        String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<MessageCollection>\n");
    for (bug_type, fields) in &catalog.patterns {
        xml.push_str(&format!("  <BugPattern type=\"{}\">\n", escape(bug_type.as_str())));
        for (name, text) in fields {
            xml.push_str(&format!("    <{name}>{}</{name}>\n", escape(text.as_str())));
        }
        xml.push_str("  </BugPattern>\n");
    }
    for (abbrev, description) in &catalog.codes {
        match abbrev {
            Some(abbrev) => xml.push_str(&format!(
                "  <BugCode abbrev=\"{}\">{}</BugCode>\n",
                escape(abbrev.as_str()),
                escape(description.as_str())
            )),
            None => xml.push_str(&format!(
                "  <BugCode>{}</BugCode>\n",
                escape(description.as_str())
            )),
        }
    }
    xml.push_str("</MessageCollection>\n");
    xml
}

fn write_file(root: &Path, relative: &str, content: &[u8]) -> std::io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// A bundle on disk; the directory is removed on drop.
#[derive(Debug)]
pub struct TestBundle {
    dir: TempDir,
    location: BundleLocation,
}

impl TestBundle {
    pub fn location(&self) -> &BundleLocation {
        &self.location
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Overwrite or add a file after the bundle was built. Directory bundles only.
    pub fn write(&self, relative: &str, content: &str) -> std::io::Result<()> {
        write_file(self.dir.path(), relative, content.as_bytes())
    }

    pub fn remove(&self, relative: &str) -> std::io::Result<()> {
        std::fs::remove_file(self.dir.path().join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_escapes_attributes() {
        let builder = BundleBuilder::new()
            .declared_detector("a.B", Some("t<rue"))
            .bug_pattern("X&Y", "XY", "CORRECTNESS");
        let xml = builder.descriptor_xml();
        assert!(xml.contains(r#"<Detector class="a.B" disabled="t&lt;rue"/>"#));
        assert!(xml.contains(r#"<BugPattern type="X&amp;Y" abbrev="XY" category="CORRECTNESS"/>"#));
    }

    #[test]
    fn catalog_writes_fields_and_codes() {
        let mut builder = BundleBuilder::new()
            .message_fields("NP", &[("Details", "<p>x</p>")])
            .bug_code_without_abbrev("plain");
        let xml = catalog_xml(builder.current_catalog_mut());
        assert!(xml.contains("    <Details>&lt;p&gt;x&lt;/p&gt;</Details>\n"));
        assert!(xml.contains("  <BugCode>plain</BugCode>\n"));
    }
}
