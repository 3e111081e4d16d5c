use anyhow::{Context, Result};
use onscreen_core::geometry::inset;
use onscreen_core::{HostWindow, SinkError, WindowAttributeSink, WindowAttributes};
use onscreen_types::{Point, Rect};
use windows::Win32::Foundation::{
    COLORREF, ERROR_SUCCESS, GetLastError, HWND, POINT, RECT, SetLastError, WIN32_ERROR,
};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowW, GWL_EXSTYLE, GetClientRect, GetCursorPos, GetWindowLongPtrW, GetWindowRect,
    HWND_NOTOPMOST, HWND_TOPMOST, IsIconic, LWA_COLORKEY, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_NOZORDER, SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos, WS_EX_LAYERED,
    WS_EX_TOPMOST, WS_EX_TRANSPARENT,
};
use windows::core::{HSTRING, PCWSTR};

/// The overlay's top-level window, found by title
pub struct Win32Window {
    hwnd: HWND,
    toolbar_height: i32,
    padding: i32,
}

impl Win32Window {
    pub fn find(title: &str, toolbar_height: i32, padding: i32) -> Result<Self> {
        let hwnd = unsafe { FindWindowW(PCWSTR::null(), &HSTRING::from(title)) }
            .with_context(|| format!("No window titled '{title}'"))?;

        Ok(Self {
            hwnd,
            toolbar_height,
            padding,
        })
    }

    /// Put the window back where it was last saved
    pub fn restore_bounds(&self, bounds: Rect) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .context("Failed to restore window bounds")
    }

    /// Client area in screen coordinates
    fn client_area(&self) -> Option<Rect> {
        let mut client = RECT::default();
        let mut origin = POINT::default();
        unsafe {
            GetClientRect(self.hwnd, &mut client).ok()?;
            if !ClientToScreen(self.hwnd, &mut origin).as_bool() {
                return None;
            }
        }
        Some(Rect::new(
            origin.x,
            origin.y,
            client.right - client.left,
            client.bottom - client.top,
        ))
    }
}

impl HostWindow for Win32Window {
    fn cursor_position(&self) -> Option<Point> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.ok()?;
        Some(Point::new(point.x, point.y))
    }

    fn outer_bounds(&self) -> Rect {
        let mut rect = RECT::default();
        if unsafe { GetWindowRect(self.hwnd, &mut rect) }.is_err() {
            return Rect::default();
        }
        Rect::new(rect.left, rect.top, rect.right - rect.left, rect.bottom - rect.top)
    }

    fn capture_region(&self) -> Rect {
        let Some(client) = self.client_area() else {
            return Rect::default();
        };
        // Toolbar sits on top of the content area
        let content = Rect::new(
            client.x,
            client.y + self.toolbar_height,
            client.width,
            (client.height - self.toolbar_height).max(0),
        );
        inset(content, self.padding)
    }

    fn is_minimized(&self) -> bool {
        unsafe { IsIconic(self.hwnd) }.as_bool()
    }
}

impl WindowAttributeSink for Win32Window {
    fn apply(&self, attributes: WindowAttributes) -> Result<(), SinkError> {
        let os_error = |e: windows::core::Error| SinkError::AttributeSinkFailure(e.message());

        let current = unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) } as u32;
        let style = ex_style(current, attributes);

        unsafe {
            // 0 is also a valid previous style, so only the thread error tells
            SetLastError(ERROR_SUCCESS);
            let previous = SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, style as isize);
            check_style_write(previous, GetLastError())?;

            if let Some(key) = attributes.color_key {
                SetLayeredWindowAttributes(self.hwnd, COLORREF(key.to_colorref()), 255, LWA_COLORKEY)
                    .map_err(os_error)?;
            }

            // The style bit alone does not change z-order
            let insert_after = if attributes.topmost {
                HWND_TOPMOST
            } else {
                HWND_NOTOPMOST
            };
            SetWindowPos(
                self.hwnd,
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
            .map_err(os_error)?;
        }

        Ok(())
    }
}

/// `current` with the three managed bits set from `attributes`
fn ex_style(current: u32, attributes: WindowAttributes) -> u32 {
    let managed = WS_EX_TOPMOST.0 | WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0;
    let mut style = current & !managed;
    if attributes.topmost {
        style |= WS_EX_TOPMOST.0;
    }
    if attributes.layered {
        style |= WS_EX_LAYERED.0;
    }
    if attributes.input_transparent {
        style |= WS_EX_TRANSPARENT.0;
    }
    style
}

fn check_style_write(previous: isize, last_error: WIN32_ERROR) -> Result<(), SinkError> {
    if previous == 0 && last_error != ERROR_SUCCESS {
        let message = windows::core::Error::from(last_error.to_hresult()).message();
        return Err(SinkError::AttributeSinkFailure(format!(
            "SetWindowLongPtrW failed: {message}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use onscreen_types::ColorKey;
    use windows::Win32::Foundation::ERROR_ACCESS_DENIED;
    use windows::Win32::UI::WindowsAndMessaging::WS_EX_TOOLWINDOW;

    use super::*;

    #[test]
    fn style_keeps_unmanaged_bits() {
        let current = WS_EX_TOOLWINDOW.0 | WS_EX_TRANSPARENT.0;

        let pass_through = ex_style(current, WindowAttributes::pass_through(ColorKey::default()));
        assert_eq!(
            pass_through,
            WS_EX_TOOLWINDOW.0 | WS_EX_TOPMOST.0 | WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0
        );

        let interactive = ex_style(current, WindowAttributes::interactive(ColorKey::default()));
        assert_eq!(interactive, WS_EX_TOOLWINDOW.0 | WS_EX_TOPMOST.0 | WS_EX_LAYERED.0);

        assert_eq!(ex_style(pass_through, WindowAttributes::disabled()), WS_EX_TOOLWINDOW.0);
    }

    #[test]
    fn failed_style_write_is_reported() {
        let err = check_style_write(0, ERROR_ACCESS_DENIED).unwrap_err();
        assert!(matches!(err, SinkError::AttributeSinkFailure(message) if message.contains("SetWindowLongPtrW")));
    }

    #[test]
    fn zero_previous_style_is_not_an_error() {
        assert!(check_style_write(0, ERROR_SUCCESS).is_ok());
        assert!(check_style_write(0x100, ERROR_ACCESS_DENIED).is_ok());
    }
}
