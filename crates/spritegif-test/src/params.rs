//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use spritegif_core::Surface;
use std::fs;
use std::io::BufWriter;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results in memory (default)
    #[default]
    Compare,
    /// Also write compared surfaces to the regout directory for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, current comparison index, mode, and every
/// failure seen so far. Comparisons never panic; call [`RegParams::cleanup`]
/// at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "compose")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Check a boolean condition
    pub fn compare_true(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Compare two surfaces for exact equality
    ///
    /// In display mode both surfaces are also written as PNG files.
    ///
    /// # Returns
    ///
    /// `true` if the surfaces are identical, `false` otherwise.
    pub fn compare_surfaces(&mut self, expected: &Surface, actual: &Surface) -> bool {
        self.index += 1;

        if self.display() {
            let _ = self.write_surface(expected, "expected");
            let _ = self.write_surface(actual, "actual");
        }

        if !expected.sizes_equal(actual) {
            let msg = format!(
                "Failure in {}_reg: surface comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            );
            self.fail(msg);
            return false;
        }

        for y in 0..expected.height() {
            for x in 0..expected.width() {
                let p1 = expected.get_pixel(x, y);
                let p2 = actual.get_pixel(x, y);
                if p1 != p2 {
                    let msg = format!(
                        "Failure in {}_reg: surface comparison for index {} - pixel mismatch \
                         at ({}, {}): {:08x?} vs {:08x?}",
                        self.test_name, self.index, x, y, p1, p2
                    );
                    self.fail(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Compare two binary data arrays
    pub fn compare_bytes(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Write `surface` as a PNG to the regout directory.
    ///
    /// The file is named `<test>.<index>.<tag>.png`.
    pub fn write_surface(&self, surface: &Surface, tag: &str) -> TestResult<String> {
        let dir = regout_dir();
        fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
            path: dir.clone(),
            message: e.to_string(),
        })?;
        let path = format!("{}/{}.{:02}.{}.png", dir, self.test_name, self.index, tag);

        let file = fs::File::create(&path)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| TestError::SurfaceWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        writer
            .write_image_data(&surface.to_rgba_bytes())
            .map_err(|e| TestError::SurfaceWrite {
                path: path.clone(),
                message: e.to_string(),
            })?;
        writer.finish().map_err(|e| TestError::SurfaceWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_surfaces() {
        let a = Surface::new_filled(3, 2, 0x11223344).unwrap();
        let b = a.deep_clone();
        let c = Surface::new_filled(3, 2, 0x11223345).unwrap();
        let mut rp = RegParams::new("surfaces");
        assert!(rp.compare_surfaces(&a, &b));
        assert!(!rp.compare_surfaces(&a, &c));
        assert!(!rp.compare_surfaces(&a, &Surface::new(2, 3).unwrap()));
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }
}
