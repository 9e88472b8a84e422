mod app;
mod ui;

use crate::error::Result;
use crate::session::Session;

pub use app::{App, Notice, NoticeKind};

/// Run the interactive calculator
pub fn run(session: Session) -> Result<()> {
    let mut app = App::new(session);
    app.run()
}
