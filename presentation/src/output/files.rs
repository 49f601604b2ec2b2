//! Writes screen layouts and mockups to disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tux_application::PipelineResult;
use tux_domain::{ImageMockup, ScreenLayout};

/// Writes one file per artifact into an output directory
///
/// Layouts become `<screen_id>.html`, locally drawn mockups
/// `<screen_id>.svg`. Remote mockups are listed in `mockups.txt` by URL.
/// The whole result is also written as `result.json`.
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write every artifact of a pipeline run, returning the paths written
    pub fn write_result(&self, result: &PipelineResult) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir)?;
        let mut written = Vec::new();

        for layout in &result.layouts {
            written.push(self.write_layout(layout)?);
        }

        let mut remote = Vec::new();
        for mockup in &result.mockups {
            match self.write_mockup(mockup)? {
                Some(path) => written.push(path),
                None => remote.push(format!("{}\t{}", mockup.screen_id, mockup.image_source)),
            }
        }
        if !remote.is_empty() {
            let path = self.out_dir.join("mockups.txt");
            fs::write(&path, remote.join("\n") + "\n")?;
            written.push(path);
        }

        let json = serde_json::to_string_pretty(result).map_err(io::Error::other)?;
        let path = self.out_dir.join("result.json");
        fs::write(&path, json)?;
        written.push(path);

        Ok(written)
    }

    pub fn write_layout(&self, layout: &ScreenLayout) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self
            .out_dir
            .join(format!("{}.html", file_stem(&layout.screen_id)));
        fs::write(&path, &layout.html_layout)?;
        Ok(path)
    }

    /// Write an inline SVG mockup; `None` for mockups that only have a URL
    pub fn write_mockup(&self, mockup: &ImageMockup) -> io::Result<Option<PathBuf>> {
        let Some(svg) = mockup.inline_svg() else {
            return Ok(None);
        };
        fs::create_dir_all(&self.out_dir)?;
        let path = self
            .out_dir
            .join(format!("{}.svg", file_stem(&mockup.screen_id)));
        fs::write(&path, svg)?;
        Ok(Some(path))
    }
}

/// Screen ids come from providers; keep them to one safe path segment.
fn file_stem(screen_id: &str) -> String {
    let stem: String = screen_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "screen".to_string()
    } else {
        stem
    }
}
