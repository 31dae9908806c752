//! Development-environment bootstrap for a generated project.
//!
//! Writes editor config, Makefile, test scaffold, lint config, CI
//! workflow, env-file support, and a README into the project directory.
//! Every write is overwrite-safe: a second run produces byte-identical
//! files. The entry-point patch is applied at most once, detected by the
//! `flutter_dotenv` marker.

use crate::error::Result;
use crate::exec::Driver;
use crate::paths;
use serde_json::json;
use std::path::PathBuf;

const DOTENV_MARKER: &str = "flutter_dotenv";
const DOTENV_IMPORT: &str = "import 'package:flutter_dotenv/flutter_dotenv.dart';";

pub struct Bootstrapper<'a> {
    driver: &'a Driver<'a>,
    sdk_root: PathBuf,
    project_path: PathBuf,
    project_name: String,
    package_name: String,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(
        driver: &'a Driver<'a>,
        sdk_root: impl Into<PathBuf>,
        project_path: impl Into<PathBuf>,
        project_name: impl Into<String>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            sdk_root: sdk_root.into(),
            project_path: project_path.into(),
            project_name: project_name.into(),
            package_name: package_name.into(),
        }
    }

    pub fn bootstrap(&self) -> Result<()> {
        self.write_editor_config()?;
        self.write_makefile()?;
        self.write_test_scaffold()?;
        self.write_analysis_options()?;
        self.write_ci_workflow()?;
        self.add_dependencies();
        self.write_env_support()?;
        self.write_readme()?;
        self.format_code();
        Ok(())
    }

    fn write(&self, relative: &str, content: &[u8]) -> Result<()> {
        let path = self.project_path.join(relative);
        let existed = path.exists();
        self.driver.write_file(&path, content)?;
        if self.driver.is_dry_run() {
            return Ok(());
        }
        if existed {
            println!("  updated: {relative}");
        } else {
            println!("  created: {relative}");
        }
        Ok(())
    }

    fn write_editor_config(&self) -> Result<()> {
        let settings = json!({
            "dart.flutterHotReloadOnSave": "all",
            "dart.lineLength": 100,
            "editor.formatOnSave": true,
            "editor.defaultFormatter": "Dart-Code.dart-code",
            "files.exclude": {
                "**/.dart_tool": true,
                "**/build": true
            }
        });
        self.write(
            paths::VSCODE_SETTINGS,
            serde_json::to_string_pretty(&settings)?.as_bytes(),
        )?;

        let launch = json!({
            "version": "0.2.0",
            "configurations": [
                {
                    "name": "Flutter Debug",
                    "request": "launch",
                    "type": "dart"
                }
            ]
        });
        self.write(
            paths::VSCODE_LAUNCH,
            serde_json::to_string_pretty(&launch)?.as_bytes(),
        )
    }

    fn write_makefile(&self) -> Result<()> {
        self.write(paths::MAKEFILE, MAKEFILE_CONTENT.as_bytes())
    }

    fn write_test_scaffold(&self) -> Result<()> {
        self.write(paths::UNIT_TEST_FILE, UNIT_TEST_CONTENT.as_bytes())?;
        self.write(
            paths::WIDGET_TEST_FILE,
            widget_test_content(&self.package_name).as_bytes(),
        )?;
        self.write(
            paths::INTEGRATION_TEST_FILE,
            integration_test_content(&self.package_name).as_bytes(),
        )
    }

    fn write_analysis_options(&self) -> Result<()> {
        self.write(paths::ANALYSIS_OPTIONS, ANALYSIS_OPTIONS_CONTENT.as_bytes())
    }

    fn write_ci_workflow(&self) -> Result<()> {
        self.write(paths::CI_WORKFLOW, CI_WORKFLOW_CONTENT.as_bytes())
    }

    /// Best-effort: a missing or broken pub cache shouldn't sink the whole
    /// bootstrap, and `flutter doctor` output already covers the fallout.
    fn add_dependencies(&self) {
        let flutter = paths::flutter_bin(&self.sdk_root);
        let flutter = flutter.to_string_lossy();
        let runs: &[&[&str]] = &[
            &["pub", "add", "flutter_dotenv"],
            &["pub", "add", "--dev", "flutter_lints", "integration_test"],
        ];
        for args in runs {
            match self.driver.run(&flutter, args, Some(&self.project_path)) {
                Ok(out) if out.success() => {}
                _ => println!("  warning: 'flutter {}' failed", args.join(" ")),
            }
        }
    }

    fn write_env_support(&self) -> Result<()> {
        self.write(paths::ENV_FILE, ENV_FILE_CONTENT.as_bytes())?;
        self.patch_entry_point_file()
    }

    fn patch_entry_point_file(&self) -> Result<()> {
        let path = self.project_path.join(paths::MAIN_DART);
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.contains(DOTENV_MARKER) {
            println!("  exists:  {} (already loads .env)", paths::MAIN_DART);
            return Ok(());
        }
        let patched = patch_entry_point(&content);
        self.driver.write_file(&path, patched.as_bytes())?;
        if !self.driver.is_dry_run() {
            println!("  updated: {}", paths::MAIN_DART);
        }
        Ok(())
    }

    fn write_readme(&self) -> Result<()> {
        self.write(paths::README, readme_content(&self.project_name).as_bytes())
    }

    fn format_code(&self) {
        let dart = paths::dart_bin(&self.sdk_root);
        match self
            .driver
            .run(&dart.to_string_lossy(), &["format", "."], Some(&self.project_path))
        {
            Ok(out) if out.success() => {}
            _ => println!("  warning: dart format failed"),
        }
    }
}

/// Insert the dotenv import after the first `package:flutter` import (or at
/// the top) and make `main` async-load the env file. Pure; everything else
/// in the file is preserved.
pub fn patch_entry_point(content: &str) -> String {
    let mut lines: Vec<&str> = content.lines().collect();
    let import_index = lines
        .iter()
        .position(|l| l.trim_start().starts_with("import ") && l.contains("package:flutter"));
    match import_index {
        Some(i) => lines.insert(i + 1, DOTENV_IMPORT),
        None => lines.insert(0, DOTENV_IMPORT),
    }
    let joined = lines.join("\n");
    let patched = joined.replace(
        "void main() {",
        "Future<void> main() async {\n  await dotenv.load(fileName: \".env\");",
    );
    if content.ends_with('\n') && !patched.ends_with('\n') {
        format!("{patched}\n")
    } else {
        patched
    }
}

// ---------------------------------------------------------------------------
// Template content
// ---------------------------------------------------------------------------

const MAKEFILE_CONTENT: &str = "\
run:
\tflutter run -d chrome

run_ios:
\tflutter run -d ios

run_android:
\tflutter run -d android

analyze:
\tflutter analyze

test:
\tflutter test

integration:
\tflutter test integration_test
";

const UNIT_TEST_CONTENT: &str = r#"import 'package:flutter_test/flutter_test.dart';

void main() {
  test('sanity check', () {
    expect(1 + 1, equals(2));
  });
}
"#;

fn widget_test_content(package_name: &str) -> String {
    format!(
        r#"import 'package:flutter_test/flutter_test.dart';
import 'package:{package_name}/main.dart';

void main() {{
  testWidgets('App loads without errors', (tester) async {{
    await tester.pumpWidget(const MyApp());
    expect(find.byType(MyApp), findsOneWidget);
  }});
}}
"#
    )
}

fn integration_test_content(package_name: &str) -> String {
    format!(
        r#"import 'package:integration_test/integration_test.dart';
import 'package:flutter_test/flutter_test.dart';
import 'package:{package_name}/main.dart';

void main() {{
  IntegrationTestWidgetsFlutterBinding.ensureInitialized();

  testWidgets('home page renders', (tester) async {{
    await tester.pumpWidget(const MyApp());
    expect(find.byType(MyApp), findsOneWidget);
  }});
}}
"#
    )
}

const ANALYSIS_OPTIONS_CONTENT: &str = "\
include: package:flutter_lints/flutter.yaml

linter:
  rules:
    avoid_print: false
    prefer_const_constructors: true
";

const CI_WORKFLOW_CONTENT: &str = "\
name: Flutter CI

on:
  push:
    branches: [ main ]
  pull_request:

jobs:
  build:
    runs-on: macos-latest
    steps:
      - uses: actions/checkout@v4
      - uses: subosito/flutter-action@v2
        with:
          flutter-version: 'stable'
      - run: flutter pub get
      - run: flutter analyze
      - run: flutter test
";

const ENV_FILE_CONTENT: &str = "\
# Example environment variables
API_URL=https://api.example.com
";

fn readme_content(project_name: &str) -> String {
    format!(
        "# {project_name}

Flutter app scaffolded by fsetup.

## Quickstart
```bash
flutter pub get
make run            # runs on Chrome by default
```

## Testing
```bash
make test           # unit + widget tests
make integration    # integration_test/
```

## Linting
```bash
make analyze
```

## Env vars
Edit `.env` and access with `dotenv.env['KEY']` after startup.
"
    )
}
