//! Regression test parameters and comparisons

use ndimage_core::{DType, NdArray};

/// Regression test parameters
///
/// Tracks the test name, the index of the current comparison and the
/// overall success status. Every failed comparison is recorded and reported
/// by [`cleanup`](Self::cleanup).
pub struct RegParams {
    /// Name of the test (e.g., "correlate")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Print every comparison, not just failures
    verbose: bool,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Setting `REGTEST_VERBOSE` to any non-empty value reports every
    /// comparison.
    pub fn new(test_name: &str) -> Self {
        let verbose = std::env::var("REGTEST_VERBOSE").is_ok_and(|v| !v.is_empty());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            verbose,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    fn pass(&self, what: &str) -> bool {
        if self.verbose {
            eprintln!("ok {}_reg index {}: {}", self.test_name, self.index, what);
        }
        true
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

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            self.pass("value")
        }
    }

    /// Compare two arrays for exact equality of shape, dtype and elements
    pub fn compare_arrays(&mut self, expected: &NdArray, actual: &NdArray) -> bool {
        self.index += 1;

        if expected.shape() != actual.shape() || expected.dtype() != actual.dtype() {
            let msg = format!(
                "Failure in {}_reg: array comparison for index {} - \
                 expected {:?} {}, got {:?} {}",
                self.test_name,
                self.index,
                expected.shape(),
                expected.dtype(),
                actual.shape(),
                actual.dtype()
            );
            return self.fail(msg);
        }

        let e = expected.to_vec_f64();
        let a = actual.to_vec_f64();
        if let Some(pos) = e.iter().zip(&a).position(|(x, y)| x != y) {
            let msg = format!(
                "Failure in {}_reg: array comparison for index {} - \
                 element mismatch at flat index {}: expected {}, got {}",
                self.test_name, self.index, pos, e[pos], a[pos]
            );
            return self.fail(msg);
        }

        self.pass("array")
    }

    /// Compare the shape and elements of two arrays within `delta`,
    /// ignoring dtype
    pub fn compare_arrays_close(&mut self, expected: &NdArray, actual: &NdArray, delta: f64) -> bool {
        self.index += 1;

        if expected.shape() != actual.shape() {
            let msg = format!(
                "Failure in {}_reg: array comparison for index {} - shape {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.shape(),
                actual.shape()
            );
            return self.fail(msg);
        }
        self.index -= 1;
        self.compare_slice(&expected.to_vec_f64(), actual, delta)
    }

    /// Compare the row-major elements of `actual` against `expected`
    pub fn compare_slice(&mut self, expected: &[f64], actual: &NdArray, delta: f64) -> bool {
        self.index += 1;

        let a = actual.to_vec_f64();
        if a.len() != expected.len() {
            let msg = format!(
                "Failure in {}_reg: slice comparison for index {} - {} elements vs {}",
                self.test_name,
                self.index,
                expected.len(),
                a.len()
            );
            return self.fail(msg);
        }

        for (pos, (e, v)) in expected.iter().zip(&a).enumerate() {
            let diff = (e - v).abs();
            if diff > delta || (diff.is_nan() && !(e.is_nan() && v.is_nan())) {
                let msg = format!(
                    "Failure in {}_reg: slice comparison for index {} - \
                     element {}: expected {}, got {} (delta {})",
                    self.test_name, self.index, pos, e, v, delta
                );
                return self.fail(msg);
            }
        }

        self.pass("slice")
    }

    /// Compare the dtype of an array
    pub fn compare_dtype(&mut self, expected: DType, actual: &NdArray) -> bool {
        self.index += 1;

        if expected != actual.dtype() {
            let msg = format!(
                "Failure in {}_reg: dtype comparison for index {} - expected {}, got {}",
                self.test_name,
                self.index,
                expected,
                actual.dtype()
            );
            self.fail(msg)
        } else {
            self.pass("dtype")
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
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

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
