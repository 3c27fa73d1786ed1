// SPDX-License-Identifier: MIT
//
// vt-curses demo — a key viewer on the controlling terminal.
//
// Draws a title bar and a status line, then shows the printable name of
// every byte you type. `q` quits.
//
// Usage:
//   cargo run -p vt-curses --example demo
//   RUST_LOG=debug cargo run -p vt-curses --example demo 2>trace.log

#[cfg(unix)]
fn main() -> vt_curses::Result<()> {
    use tracing_subscriber::EnvFilter;
    use vt_curses::config::{SCREEN_COLS, SCREEN_ROWS};
    use vt_curses::driver::PosixDriver;
    use vt_curses::{Attr, Color, Screen, unctrl};

    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let mut scr = Screen::init(PosixDriver::new()?)?;
    scr.raw()?;
    scr.noecho();
    scr.start_color()?;
    scr.init_pair(1, Color::White, Color::Blue)?;
    scr.init_pair(2, Color::Black, Color::Cyan)?;

    let title = format!("{:<width$}", " vt-curses demo", width = usize::from(SCREEN_COLS));
    scr.attrset(scr.color_pair(1)?)?;
    scr.mvaddstr(0, 0, &title)?;
    scr.attrset(Attr::NORMAL)?;

    let mut row = 2;
    loop {
        scr.attrset(scr.color_pair(2)?)?;
        scr.mvaddstr(SCREEN_ROWS - 1, 0, " press keys, q to quit ")?;
        scr.standend()?;
        scr.move_to(row, 2)?;
        scr.refresh()?;

        let b = scr.getch()?;
        if b == b'q' {
            break;
        }

        scr.move_to(row, 2)?;
        scr.clrtoeol()?;
        scr.addstr(format!("{b:#04x}  "))?;
        scr.attron(Attr::UNDERLINE)?;
        scr.addstr(unctrl(b).as_str())?;
        scr.standend()?;

        row = if row + 1 >= SCREEN_ROWS - 1 { 2 } else { row + 1 };
    }

    scr.noraw()?;
    scr.end()
}

#[cfg(not(unix))]
fn main() {
    eprintln!("the vt-curses demo needs a POSIX terminal");
}
