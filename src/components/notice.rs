use std::time::Duration;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
	Info,
	Success,
	Error,
}

/// A short message shown above the workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub kind: NoticeKind,
	pub text: String,
}

impl Notice {
	pub fn info(text: impl Into<String>) -> Self {
		Self {
			kind: NoticeKind::Info,
			text: text.into(),
		}
	}

	pub fn success(text: impl Into<String>) -> Self {
		Self {
			kind: NoticeKind::Success,
			text: text.into(),
		}
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self {
			kind: NoticeKind::Error,
			text: text.into(),
		}
	}

	fn class(&self) -> &'static str {
		match self.kind {
			NoticeKind::Info => "notice notice-info",
			NoticeKind::Success => "notice notice-success",
			NoticeKind::Error => "notice notice-error",
		}
	}
}

const DISMISS_AFTER: Duration = Duration::from_secs(4);

/// Shows the latest notice until it is dismissed or replaced, clearing it
/// automatically after a few seconds.
#[component]
pub fn NoticeBar(notice: RwSignal<Option<Notice>>) -> impl IntoView {
	Effect::new(move |_| {
		let Some(shown) = notice.get() else {
			return;
		};
		set_timeout(
			move || {
				// Leave a newer notice alone.
				if notice.get_untracked().as_ref() == Some(&shown) {
					notice.set(None);
				}
			},
			DISMISS_AFTER,
		);
	});

	move || {
		notice.get().map(|n| {
			view! {
				<div class=n.class() role="status">
					<span>{n.text.clone()}</span>
					<button class="notice-close" on:click=move |_| notice.set(None)>
						"×"
					</button>
				</div>
			}
		})
	}
}
