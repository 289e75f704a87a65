use std::path::{Path, PathBuf};

use miette::{bail, miette, Result};

/// A host dotfile resolved against `$HOME`, to be mounted read-only at the
/// same relative path under the container user's home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotfileMount {
    pub host: PathBuf,
    /// Path relative to `$HOME`; always begins with a dot.
    pub name: String,
}

impl DotfileMount {
    pub fn volume_arg(&self, container_home: &str) -> String {
        format!(
            "{}:{}/{}:ro",
            self.host.display(),
            container_home,
            self.name
        )
    }
}

/// Resolves a `--dotfile` argument against the user's home directory.
///
/// Accepts a bare name (`.vimrc`), a `~/`-prefixed path, or an absolute path
/// inside `$HOME`. The file must exist and must be hidden.
pub fn resolve(home: &Path, raw: &str) -> Result<DotfileMount> {
    let host = if let Some(stripped) = raw.strip_prefix("~/") {
        home.join(stripped)
    } else if Path::new(raw).is_absolute() {
        let path = PathBuf::from(raw);
        if !path.starts_with(home) {
            bail!("{raw}: not in your $HOME");
        }
        path
    } else {
        home.join(raw)
    };

    if !host.exists() {
        bail!("{}: no such file or directory", host.display());
    }

    let name = host
        .strip_prefix(home)
        .map_err(|_| miette!("{raw}: not in your $HOME"))?
        .to_string_lossy()
        .into_owned();

    if !name.starts_with('.') {
        bail!("{}: not a dotfile", host.display());
    }

    Ok(DotfileMount { host, name })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn fake_home() -> tempfile::TempDir {
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(".vimrc"), "set number\n").unwrap();
        fs::write(home.path().join("notes.txt"), "").unwrap();
        fs::create_dir_all(home.path().join(".config/editor")).unwrap();
        fs::write(home.path().join(".config/editor/init.lua"), "").unwrap();
        home
    }

    #[test]
    fn bare_name_resolves_under_home() {
        let home = fake_home();
        let mount = resolve(home.path(), ".vimrc").unwrap();
        assert_eq!(mount.host, home.path().join(".vimrc"));
        assert_eq!(mount.name, ".vimrc");
    }

    #[test]
    fn tilde_prefix_is_expanded() {
        let home = fake_home();
        let mount = resolve(home.path(), "~/.vimrc").unwrap();
        assert_eq!(mount.host, home.path().join(".vimrc"));
    }

    #[test]
    fn absolute_path_inside_home_is_accepted() {
        let home = fake_home();
        let raw = home.path().join(".vimrc");
        let mount = resolve(home.path(), &raw.to_string_lossy()).unwrap();
        assert_eq!(mount.name, ".vimrc");
    }

    #[test]
    fn absolute_path_outside_home_is_rejected() {
        let home = fake_home();
        let err = resolve(home.path(), "/etc/passwd").unwrap_err();
        assert!(err.to_string().contains("not in your $HOME"));
    }

    #[test]
    fn visible_file_is_rejected() {
        let home = fake_home();
        let err = resolve(home.path(), "notes.txt").unwrap_err();
        assert!(err.to_string().contains("not a dotfile"));
    }

    #[test]
    fn missing_file_is_rejected() {
        let home = fake_home();
        let err = resolve(home.path(), ".bashrc").unwrap_err();
        assert!(err.to_string().contains("no such file or directory"));
    }

    #[test]
    fn nested_dotfile_keeps_relative_path() {
        let home = fake_home();
        let mount = resolve(home.path(), ".config/editor/init.lua").unwrap();
        assert_eq!(mount.name, ".config/editor/init.lua");
        assert_eq!(
            mount.volume_arg("/home/ubuntu"),
            format!(
                "{}:/home/ubuntu/.config/editor/init.lua:ro",
                home.path().join(".config/editor/init.lua").display()
            )
        );
    }
}
