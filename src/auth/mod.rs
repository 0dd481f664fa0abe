mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register;
mod session;

pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::{build_log_in_redirect_url, normalize_redirect_url};
pub use register::{get_register_page, post_register};
pub use session::{
    DEFAULT_COOKIE_DURATION, Session, get_auth_header, get_current_user,
    invalidate_session_cookie, set_session_cookie,
};

#[cfg(test)]
pub(crate) use redirect::log_in_url_with_redirect;
#[cfg(test)]
pub(crate) use session::COOKIE_USER;
