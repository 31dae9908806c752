//! Small printing helpers so stages share one visual vocabulary:
//! section headers, indented detail lines, and warnings on stderr.

pub fn section(title: &str) {
    println!("\n{title}...");
}

pub fn detail(message: impl AsRef<str>) {
    println!("  {}", message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("warning: {}", message.as_ref());
}
