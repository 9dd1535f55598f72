use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A fresh output directory under the cargo target directory
pub fn target_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let target = Path::new(env!("CARGO_TARGET_TMPDIR"));
    let buf = target.join(format!(
        "target-{:?}-{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&buf).expect("could not create directory");
    buf
}

/// Writes `files` into a new temporary directory
pub fn sources(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("could not create temporary directory");
    for (name, contents) in files {
        std::fs::write(dir.path().join(name), contents).expect("could not write source file");
    }
    dir
}

pub const SQUARE: &str = r#"
/** Implements a graphical square. */
class Square {
   field int x, y; // screen location of the square's top-left corner
   field int size; // length of this square, in pixels

   /** Constructs a new square with a given location and size. */
   constructor Square new(int Ax, int Ay, int Asize) {
      let x = Ax;
      let y = Ay;
      let size = Asize;
      do draw();
      return this;
   }

   /** Increments the square size by 2 pixels. */
   method void incSize() {
      if (((y + size) < 254) & ((x + size) < 510)) {
         do erase();
         let size = size + 2;
         do draw();
      }
      return;
   }
}
"#;

pub const MAIN: &str = r#"
// Computes the sum of an array
class Main {
   function void main() {
      var Array a;
      var int i, sum;
      let a = Array.new(3);
      let i = 0;
      while (i < 3) {
         let sum = sum + a[i];
         let i = i + 1;
      }
      do Output.printString("sum: ");
      do Output.printInt(sum);
      return;
   }
}
"#;
