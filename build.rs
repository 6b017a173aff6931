use std::process::Command;

fn main() {
	// not every build happens inside a git checkout (or with git installed at all)
	let git_hash = Command::new("git")
		.args(["rev-parse", "--short", "HEAD"])
		.output()
		.ok()
		.filter(|output| output.status.success())
		.and_then(|output| String::from_utf8(output.stdout).ok())
		.map(|hash| hash.trim().to_string())
		.unwrap_or_else(|| String::from("unknown"));
	println!("cargo:rustc-env=GIT_HASH={git_hash}");

	let build_ts = chrono::Utc::now();
	println!("cargo:rustc-env=BUILD_TS={build_ts:?}");
}
