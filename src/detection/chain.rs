use super::{Detection, DetectionContext, DetectionRule, DjangoRule, FlaskRule};
use crate::error::GeneratorError;
use tracing::debug;

/// Ordered list of detection rules; the first rule that matches wins
pub struct DetectorChain {
    rules: Vec<Box<dyn DetectionRule>>,
}

impl DetectorChain {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Django before Flask
    pub fn with_defaults() -> Self {
        Self::new()
            .with_rule(Box::new(DjangoRule))
            .with_rule(Box::new(FlaskRule::new()))
    }

    pub fn with_rule(mut self, rule: Box<dyn DetectionRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn detect(&self, ctx: &DetectionContext<'_>) -> Result<Option<Detection>, GeneratorError> {
        for rule in &self.rules {
            if let Some(detection) = rule.detect(ctx)? {
                return Ok(Some(detection));
            }
            debug!(rule = %rule.app_type(), "No match");
        }
        Ok(None)
    }
}

impl Default for DetectorChain {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::AppType;
    use crate::fs::MockFileSystem;
    use std::path::{Path, PathBuf};

    struct FixedRule(Option<&'static str>);

    impl DetectionRule for FixedRule {
        fn app_type(&self) -> AppType {
            AppType::Flask
        }

        fn detect(
            &self,
            ctx: &DetectionContext<'_>,
        ) -> Result<Option<Detection>, GeneratorError> {
            Ok(self.0.map(|module| Detection {
                app_type: AppType::Flask,
                module: module.to_string(),
                app_dir: ctx.source_path.to_path_buf(),
            }))
        }
    }

    #[test]
    fn test_default_order() {
        let chain = DetectorChain::default();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_django_takes_priority_over_flask() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py");
        fs.add_file("myproj/wsgi.py");

        let ctx = DetectionContext::new(&fs, Path::new("/mock"));
        let detection = DetectorChain::with_defaults().detect(&ctx).unwrap().unwrap();

        assert_eq!(detection.app_type, AppType::Django);
        assert_eq!(detection.module, "myproj.wsgi");
    }

    #[test]
    fn test_falls_through_to_flask() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py");
        fs.add_dir("static");

        let ctx = DetectionContext::new(&fs, Path::new("/mock"));
        let detection = DetectorChain::with_defaults().detect(&ctx).unwrap().unwrap();

        assert_eq!(detection.app_type, AppType::Flask);
        assert_eq!(detection.module, "app:app");
    }

    #[test]
    fn test_empty_chain_detects_nothing() {
        let fs = MockFileSystem::new();
        let ctx = DetectionContext::new(&fs, Path::new("/mock"));

        let chain = DetectorChain::new();
        assert!(chain.is_empty());
        assert!(chain.detect(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let fs = MockFileSystem::new();
        let ctx = DetectionContext::new(&fs, Path::new("/mock"));

        let chain = DetectorChain::new()
            .with_rule(Box::new(FixedRule(None)))
            .with_rule(Box::new(FixedRule(Some("first:app"))))
            .with_rule(Box::new(FixedRule(Some("second:app"))));

        let detection = chain.detect(&ctx).unwrap().unwrap();
        assert_eq!(detection.module, "first:app");
        assert_eq!(detection.app_dir, PathBuf::from("/mock"));
    }

    #[test]
    fn test_django_error_stops_chain() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py");
        fs.deny_read("/mock");

        let ctx = DetectionContext::new(&fs, Path::new("/mock"));
        assert!(DetectorChain::with_defaults().detect(&ctx).is_err());
    }
}
