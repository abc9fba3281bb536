use indicatif::*;

/// Console progress bar counting finished blocks.
pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_work: usize, title: &str) -> Self {
        let pb = ProgressBar::new(total_work as u64);
        let template = format!("{{spinner:.bold.green}} {}: ", title)
            + "[{wide_bar:.cyan}] {pos}/{len} blocks ({elapsed_precise}|{eta_precise}) ";
        match ProgressStyle::with_template(&template) {
            Ok(style) => pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁  ")),
            Err(e) => log::warn!("progress bar style: {}", e),
        }
        pb.tick();
        ProgressReporter { pb }
    }

    /// A reporter that draws nothing, for quiet runs.
    pub fn hidden(total_work: usize) -> Self {
        let pb = ProgressBar::hidden();
        pb.set_length(total_work as u64);
        ProgressReporter { pb }
    }

    pub fn update(&self, num: usize) {
        if num != 0 {
            self.pb.inc(num as u64);
        }
    }

    pub fn position(&self) -> u64 {
        return self.pb.position();
    }

    pub fn done(&self) {
        self.pb.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_counts() {
        let r = ProgressReporter::hidden(4);
        r.update(1);
        r.update(0);
        r.update(2);
        assert_eq!(r.position(), 3);
        r.done();
    }
}
