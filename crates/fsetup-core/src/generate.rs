//! Project generation via `flutter create`.

use crate::config::RunConfig;
use crate::error::Result;
use crate::exec::Driver;
use crate::paths;
use crate::types::Template;
use std::path::Path;

pub struct ProjectGenerator<'a> {
    driver: &'a Driver<'a>,
    config: &'a RunConfig,
    sdk_root: &'a Path,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(driver: &'a Driver<'a>, config: &'a RunConfig, sdk_root: &'a Path) -> Self {
        Self {
            driver,
            config,
            sdk_root,
        }
    }

    /// Invoke the generator unless the project directory already exists.
    /// Returns false when generation was skipped.
    pub fn generate(&self) -> Result<bool> {
        let project_path = self.config.project_path();
        if project_path.exists() {
            println!(
                "  exists:  {} (skipping create)",
                project_path.display()
            );
            return Ok(false);
        }

        self.driver.ensure_dir(&self.config.output_dir)?;

        let flutter = paths::flutter_bin(self.sdk_root);
        let args = self.create_args();
        let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        self.driver
            .run_checked(&flutter.to_string_lossy(), &arg_refs, None)?;
        if !self.driver.is_dry_run() {
            println!("  created: {}", project_path.display());
        }
        Ok(true)
    }

    fn create_args(&self) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            "--org".to_string(),
            self.config.org.clone(),
            "--project-name".to_string(),
            self.config.package_name(),
            "--platforms".to_string(),
            self.config.platforms_csv(),
            "--template".to_string(),
            self.config.template.as_str().to_string(),
        ];
        if self.config.template == Template::Plugin {
            args.push("--ios-language".to_string());
            args.push(self.config.ios_language.as_str().to_string());
            args.push("--android-language".to_string());
            args.push(self.config.android_language.as_str().to_string());
        }
        args.push(self.config.project_path().display().to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::FakeRunner;
    use crate::types::{AndroidLanguage, Channel, IosLanguage, UpdateMode};
    use tempfile::TempDir;

    fn config(name: &str, platforms: &[&str], template: Template, dir: &Path) -> RunConfig {
        RunConfig::new(
            name,
            &platforms.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            "com.example",
            Channel::Stable,
            dir,
            template,
            IosLanguage::Swift,
            AndroidLanguage::Kotlin,
            UpdateMode::Reset,
            false,
        )
        .unwrap()
    }

    #[test]
    fn app_template_args_match_resolved_config() {
        let dir = TempDir::new().unwrap();
        let cfg = config("MyApp", &["ios", "android", "osx"], Template::App, dir.path());
        let runner = FakeRunner::new();
        let driver = Driver::new(&runner, false);
        let sdk = dir.path().join("sdk");
        let generator = ProjectGenerator::new(&driver, &cfg, &sdk);
        let args = generator.create_args();
        assert_eq!(args[0], "create");
        assert!(args.contains(&"--platforms".to_string()));
        assert!(args.contains(&"ios,android,macos".to_string()));
        assert!(args.contains(&"myapp".to_string()));
        assert!(args.contains(&"app".to_string()));
        assert!(!args.contains(&"--ios-language".to_string()));
        assert_eq!(
            args.last().unwrap(),
            &dir.path().join("MyApp").display().to_string()
        );
    }

    #[test]
    fn plugin_template_adds_language_args() {
        let dir = TempDir::new().unwrap();
        let cfg = config("plug", &["ios"], Template::Plugin, dir.path());
        let runner = FakeRunner::new();
        let driver = Driver::new(&runner, false);
        let sdk = dir.path().join("sdk");
        let args = ProjectGenerator::new(&driver, &cfg, &sdk).create_args();
        assert!(args.contains(&"--ios-language".to_string()));
        assert!(args.contains(&"swift".to_string()));
        assert!(args.contains(&"--android-language".to_string()));
        assert!(args.contains(&"kotlin".to_string()));
    }

    #[test]
    fn existing_project_directory_skips_generation() {
        let dir = TempDir::new().unwrap();
        let cfg = config("MyApp", &["web"], Template::App, dir.path());
        std::fs::create_dir_all(cfg.project_path()).unwrap();
        let runner = FakeRunner::new();
        let driver = Driver::new(&runner, false);
        let sdk = dir.path().join("sdk");
        let created = ProjectGenerator::new(&driver, &cfg, &sdk).generate().unwrap();
        assert!(!created);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn dry_run_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let cfg = config("MyApp", &["web"], Template::App, &out);
        let runner = FakeRunner::new();
        let driver = Driver::new(&runner, true);
        let sdk = dir.path().join("sdk");
        let created = ProjectGenerator::new(&driver, &cfg, &sdk).generate().unwrap();
        assert!(created);
        assert!(!out.exists());
        assert!(runner.calls().is_empty());
    }
}
