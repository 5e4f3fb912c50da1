//! Seed datasets for the catalog.
//!
//! A seed is the fixed set of manufacturers and keyboards a store starts
//! from. The built-in dataset covers a handful of historic keyboards from
//! Apple, IBM and Dell; other seeds can be loaded from JSON.

use crate::error::{CatalogError, Result};
use crate::types::{Keyboard, Manufacturer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Manufacturers plus their keyboards, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub manufacturers: Vec<Manufacturer>,
    pub keyboards: Vec<Keyboard>,
}

impl CatalogSeed {
    /// Seed with no manufacturers and no keyboards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in dataset. Ids are generated on every call.
    pub fn defaults() -> Self {
        let apple = default_manufacturer("Apple");
        let ibm = default_manufacturer("IBM");
        let dell = default_manufacturer("Dell");

        let keyboards = vec![
            default_keyboard(
                &apple,
                "Apple Numeric Keypad IIe (A2M2003)",
                "The Numeric Keypad IIe was Apple's first external keypad. Released as an option specifically for the popular Apple IIe computer in 1983, it helped correct some of the II series' shortcomings. Later, the Platinum IIe would incorporate the numeric keypad into its built-in keyboard.",
                "https://upload.wikimedia.org/wikipedia/commons/thumb/3/3b/Apple_Numeric_Keypad_IIe.jpg/440px-Apple_Numeric_Keypad_IIe.jpg",
            ),
            default_keyboard(
                &apple,
                "Lisa Keyboard (A6MB101)",
                "The first keyboard not to be integrated into the case like the Apple II and III series before it. It was designed for and came with the Apple Lisa. Like the Apple III before it, it was intended to be a business computer and included an integrated numeric keypad. Like all Apple computers before it, it came in a beige case to match the Lisa and connected by a unique TRS connector. In addition it carried over the use of the \"open\" Apple key from the Apple III as a command key (though it was represented by the \"closed\" Apple character) and included a pullout reference guide hidden under the keyboard.",
                "https://upload.wikimedia.org/wikipedia/commons/thumb/6/67/Apple_A6MB101_keyboard_top.jpg/440px-Apple_A6MB101_keyboard_top.jpg",
            ),
            default_keyboard(
                &apple,
                "Macintosh Keyboard (M0110)",
                "Introduced and included with the original Macintosh in 1984, it debuted with neither arrow keys to control the cursor nor an integrated numeric keypad. It used a telephone cord-style RJ-11 connector to the case (also used with the Amstrad PCW series of computers). The keyboard pinouts are \"crossed\" so it isn't possible to use a standard telephone cord as a replacement; doing so will result in damage to the keyboard or the computer. The keyboard also introduced a unique command key similar to the \"open\" Apple Key on the Lisa.",
                "https://upload.wikimedia.org/wikipedia/commons/thumb/7/76/Apple_Macintosh_Plus_Keyboard.jpg/440px-Apple_Macintosh_Plus_Keyboard.jpg",
            ),
            default_keyboard(
                &ibm,
                "Model M",
                "The Model M keyboard was designed to be less expensive to produce than the Model F keyboard it replaced. Principal design work was done at IBM in 1983–1984, drawing on a wide range of user feedback, ergonomic studies, and examination of competing products. Its key layout, significantly different from the Model F's, owed much (including notably the inverted-T arrangement of its arrow keys) to the LK-201 keyboard shipped with the VT220 serial terminal.",
                "https://upload.wikimedia.org/wikipedia/commons/4/48/IBM_Model_M.png",
            ),
            default_keyboard(
                &ibm,
                "Model F",
                "The Model F was a series of computer keyboards produced mainly from 1981–1985 and in reduced volume until 1994 by IBM and later Lexmark. Its mechanical-key design consisted of a buckling spring over a capacitive PCB, similar to the later Model M keyboard that used a membrane in place of the PCB.",
                "https://upload.wikimedia.org/wikipedia/commons/thumb/5/56/IBM_Model_F_XT.png/280px-IBM_Model_F_XT.png",
            ),
            default_keyboard(
                &dell,
                "Dell AT101",
                "The Dell AT101 series was introduced as an Alps Bigfoot keyboard, with Alps SKCM Salmon switches and thick dye-sublimated keycaps with dark blue legends. Around 1992, production transferred to Silitek. With this came thin keycaps and a move to Alps SKCM Black switches. The keycap printing method is not confirmed. Evidence indicates that salmon Alps was still made and sold at this point in time, so the change of switch is not understood. Alps Bigfoot keyboards were also still being made; it remains a mystery how and why production of an extant Alps design was moved to Silitek, and whether this was done with or without Alps's participation and agreement. Silitek also introduced a rubber dome version of the keyboard. The Windows key versions introduced laser-etched legends. These were produced until at least 2001.",
                "https://deskthority.net/wiki/images/thumb/3/33/Dell_AT102W_UK_2000.jpg/500px-Dell_AT102W_UK_2000.jpg",
            ),
        ];

        Self {
            manufacturers: vec![apple, ibm, dell],
            keyboards,
        }
    }

    /// Parse a seed from a JSON document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let seed: Self = serde_json::from_slice(bytes)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Load a seed from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_json_slice(&bytes)
    }

    /// Pretty-printed JSON for this seed.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Serialization(e.to_string()))
    }

    /// Check names, id uniqueness, and that every keyboard points at a
    /// manufacturer in this seed.
    pub fn validate(&self) -> Result<()> {
        let mut manufacturer_ids = HashSet::new();
        for manufacturer in &self.manufacturers {
            if manufacturer.name().trim().is_empty() {
                return Err(CatalogError::EmptyName("manufacturer"));
            }
            if !manufacturer_ids.insert(manufacturer.id()) {
                return Err(CatalogError::DuplicateManufacturer(manufacturer.id()));
            }
        }

        let mut keyboard_ids = HashSet::new();
        for keyboard in &self.keyboards {
            if keyboard.name().trim().is_empty() {
                return Err(CatalogError::EmptyName("keyboard"));
            }
            if !keyboard_ids.insert(keyboard.id()) {
                return Err(CatalogError::DuplicateKeyboard(keyboard.id()));
            }
            if !manufacturer_ids.contains(&keyboard.manufacturer_id()) {
                return Err(CatalogError::UnknownManufacturer {
                    keyboard: keyboard.id(),
                    manufacturer: keyboard.manufacturer_id(),
                });
            }
        }

        Ok(())
    }

    /// Find a manufacturer by display name.
    pub fn manufacturer_named(&self, name: &str) -> Option<&Manufacturer> {
        self.manufacturers.iter().find(|m| m.name() == name)
    }
}

fn default_manufacturer(name: &str) -> Manufacturer {
    Manufacturer::new(name).expect("built-in manufacturer names are non-empty")
}

fn default_keyboard(
    manufacturer: &Manufacturer,
    name: &str,
    description: &str,
    image_url: &str,
) -> Keyboard {
    Keyboard::new(manufacturer.id(), name, description, image_url)
        .expect("built-in keyboard image URLs are well-formed")
}
