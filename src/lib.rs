// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! image_replay presents a single still image as a one-event GPU capture, so that the same
tooling used to inspect captured frames can inspect a texture file.

# Layers

| Layer                 | Module                      | Responsibility                                                    |
|-----------------------|-----------------------------|-------------------------------------------------------------------|
| Sniffer & decoder     | [`decode`]                  | identify DDS / OpenEXR / bitmap by header bytes, decode to a texture |
| Canonical shape       | [`texture`], [`pixel_formats`] | descriptor, dimensionality rule, pixel format                  |
| Host interface        | [`replay`]                  | the [`ReplayDriver`](replay::ReplayDriver) contract and its data |
| Adapter               | [`viewer`]                  | one logical texture, reload policy, the synthetic capture        |
| Entry point           | [`create_replay_device`]    | validate the file, build a viewer around a proxy driver          |

# Reloading

The backing file may be rewritten while it is being viewed.  When the host reports a change
([`ReplayDriver::file_changed`](replay::ReplayDriver::file_changed)) the viewer opens the file again,
retrying while a writer holds it, and decodes it from scratch.  The texture is reused when the new
contents have the same shape and replaced otherwise.  Anything that goes wrong along the way
leaves the previous image on screen.

# Example

```no_run
use image_replay::{ImageFile, create_replay_device};
use image_replay::config::ViewerConfig;
use image_replay::replay::{ReplayDriver, ReplayStatus};

fn open(path: &str, proxy: Box<dyn ReplayDriver>) -> Result<(), ReplayStatus> {
    let mut capture = ImageFile::open(path).map_err(|_| ReplayStatus::FileIOFailed)?;
    let mut viewer = create_replay_device(Some(&mut capture), || Ok(proxy), ViewerConfig::default())
        .map_err(|e| e.status())?;
    assert_eq!(viewer.frame_record().drawcall_list.len(), 1);
    viewer.file_changed();
    Ok(())
}
```
*/

pub mod config;
pub mod decode;
mod entry_point;
pub mod file_access;
pub mod pixel_formats;
pub mod replay;
pub mod texture;
pub mod viewer;

pub use entry_point::{CreateError, ImageFile, create_replay_device};
