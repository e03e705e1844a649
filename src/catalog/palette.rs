//! Named color palette.
//!
//! Each entry carries a light and a dark appearance. Dark variants of
//! low-luminance colors are lifted so they stay readable on dark
//! backgrounds; near-white colors are slightly dimmed.

use crate::model::{Rgb, ThemedColor};

/// Palette entries, sorted by name for binary search.
static PALETTE: &[(&str, ThemedColor)] = &[
    ("aqua", ThemedColor::new(Rgb(0x00ffff), Rgb(0x00ffff))),
    ("aquamarine", ThemedColor::new(Rgb(0x7fffd4), Rgb(0x7fffd4))),
    ("azure", ThemedColor::new(Rgb(0xf0ffff), Rgb(0xd8e6e6))),
    ("beige", ThemedColor::new(Rgb(0xf5f5dc), Rgb(0xdcdcc6))),
    ("bisque", ThemedColor::new(Rgb(0xffe4c4), Rgb(0xffe4c4))),
    ("black", ThemedColor::new(Rgb(0x000000), Rgb(0xcccccc))),
    ("blue", ThemedColor::new(Rgb(0x0000ff), Rgb(0x9999ff))),
    ("blueviolet", ThemedColor::new(Rgb(0x8a2be2), Rgb(0xbf8bef))),
    ("brown", ThemedColor::new(Rgb(0xa52a2a), Rgb(0xd59b9b))),
    ("burlywood", ThemedColor::new(Rgb(0xdeb887), Rgb(0xdeb887))),
    ("cadetblue", ThemedColor::new(Rgb(0x5f9ea0), Rgb(0x5f9ea0))),
    ("chartreuse", ThemedColor::new(Rgb(0x7fff00), Rgb(0x7fff00))),
    ("chocolate", ThemedColor::new(Rgb(0xd2691e), Rgb(0xd2691e))),
    ("coral", ThemedColor::new(Rgb(0xff7f50), Rgb(0xff7f50))),
    ("cornflowerblue", ThemedColor::new(Rgb(0x6495ed), Rgb(0x6495ed))),
    ("crimson", ThemedColor::new(Rgb(0xdc143c), Rgb(0xe96882))),
    ("cyan", ThemedColor::new(Rgb(0x00ffff), Rgb(0x00ffff))),
    ("darkblue", ThemedColor::new(Rgb(0x00008b), Rgb(0xbfbfe2))),
    ("darkcyan", ThemedColor::new(Rgb(0x008b8b), Rgb(0x008b8b))),
    ("darkgoldenrod", ThemedColor::new(Rgb(0xb8860b), Rgb(0xb8860b))),
    ("darkgray", ThemedColor::new(Rgb(0xa9a9a9), Rgb(0xa9a9a9))),
    ("darkgreen", ThemedColor::new(Rgb(0x006400), Rgb(0x8cb98c))),
    ("darkkhaki", ThemedColor::new(Rgb(0xbdb76b), Rgb(0xbdb76b))),
    ("darkmagenta", ThemedColor::new(Rgb(0x8b008b), Rgb(0xd098d0))),
    ("darkolivegreen", ThemedColor::new(Rgb(0x556b2f), Rgb(0xa2ae8d))),
    ("darkorange", ThemedColor::new(Rgb(0xff8c00), Rgb(0xff8c00))),
    ("darkorchid", ThemedColor::new(Rgb(0x9932cc), Rgb(0xc58ae2))),
    ("darkred", ThemedColor::new(Rgb(0x8b0000), Rgb(0xd6a6a6))),
    ("darksalmon", ThemedColor::new(Rgb(0xe9967a), Rgb(0xe9967a))),
    ("darkseagreen", ThemedColor::new(Rgb(0x8fbc8f), Rgb(0x8fbc8f))),
    ("darkslateblue", ThemedColor::new(Rgb(0x483d8b), Rgb(0xb9b5d3))),
    ("darkslategray", ThemedColor::new(Rgb(0x2f4f4f), Rgb(0xafbbbb))),
    ("darkturquoise", ThemedColor::new(Rgb(0x00ced1), Rgb(0x00ced1))),
    ("darkviolet", ThemedColor::new(Rgb(0x9400d3), Rgb(0xc97fe9))),
    ("deeppink", ThemedColor::new(Rgb(0xff1493), Rgb(0xff1493))),
    ("deepskyblue", ThemedColor::new(Rgb(0x00bfff), Rgb(0x00bfff))),
    ("dimgray", ThemedColor::new(Rgb(0x696969), Rgb(0xa7a7a7))),
    ("dodgerblue", ThemedColor::new(Rgb(0x1e90ff), Rgb(0x1e90ff))),
    ("firebrick", ThemedColor::new(Rgb(0xb22222), Rgb(0xd99292))),
    ("forestgreen", ThemedColor::new(Rgb(0x228b22), Rgb(0x60ab60))),
    ("fuchsia", ThemedColor::new(Rgb(0xff00ff), Rgb(0xff00ff))),
    ("gold", ThemedColor::new(Rgb(0xffd700), Rgb(0xffd700))),
    ("goldenrod", ThemedColor::new(Rgb(0xdaa520), Rgb(0xdaa520))),
    ("gray", ThemedColor::new(Rgb(0x808080), Rgb(0x808080))),
    ("green", ThemedColor::new(Rgb(0x008000), Rgb(0x60b060))),
    ("greenyellow", ThemedColor::new(Rgb(0xadff2f), Rgb(0xadff2f))),
    ("hotpink", ThemedColor::new(Rgb(0xff69b4), Rgb(0xff69b4))),
    ("indianred", ThemedColor::new(Rgb(0xcd5c5c), Rgb(0xcd5c5c))),
    ("indigo", ThemedColor::new(Rgb(0x4b0082), Rgb(0xccb6db))),
    ("khaki", ThemedColor::new(Rgb(0xf0e68c), Rgb(0xf0e68c))),
    ("lavender", ThemedColor::new(Rgb(0xe6e6fa), Rgb(0xe6e6fa))),
    ("lawngreen", ThemedColor::new(Rgb(0x7cfc00), Rgb(0x7cfc00))),
    ("lightblue", ThemedColor::new(Rgb(0xadd8e6), Rgb(0xadd8e6))),
    ("lightcoral", ThemedColor::new(Rgb(0xf08080), Rgb(0xf08080))),
    ("lightgreen", ThemedColor::new(Rgb(0x90ee90), Rgb(0x90ee90))),
    ("lightpink", ThemedColor::new(Rgb(0xffb6c1), Rgb(0xffb6c1))),
    ("lightsalmon", ThemedColor::new(Rgb(0xffa07a), Rgb(0xffa07a))),
    ("lightseagreen", ThemedColor::new(Rgb(0x20b2aa), Rgb(0x20b2aa))),
    ("lightskyblue", ThemedColor::new(Rgb(0x87cefa), Rgb(0x87cefa))),
    ("lime", ThemedColor::new(Rgb(0x00ff00), Rgb(0x00ff00))),
    ("limegreen", ThemedColor::new(Rgb(0x32cd32), Rgb(0x32cd32))),
    ("magenta", ThemedColor::new(Rgb(0xff00ff), Rgb(0xff00ff))),
    ("maroon", ThemedColor::new(Rgb(0x800000), Rgb(0xd6acac))),
    ("mediumblue", ThemedColor::new(Rgb(0x0000cd), Rgb(0xadadef))),
    ("mediumpurple", ThemedColor::new(Rgb(0x9370db), Rgb(0x9370db))),
    ("midnightblue", ThemedColor::new(Rgb(0x191970), Rgb(0xc4c4da))),
    ("navy", ThemedColor::new(Rgb(0x000080), Rgb(0xc1c1e0))),
    ("olive", ThemedColor::new(Rgb(0x808000), Rgb(0x808000))),
    ("orange", ThemedColor::new(Rgb(0xffa500), Rgb(0xffa500))),
    ("orangered", ThemedColor::new(Rgb(0xff4500), Rgb(0xff4500))),
    ("orchid", ThemedColor::new(Rgb(0xda70d6), Rgb(0xda70d6))),
    ("peru", ThemedColor::new(Rgb(0xcd853f), Rgb(0xcd853f))),
    ("pink", ThemedColor::new(Rgb(0xffc0cb), Rgb(0xffc0cb))),
    ("plum", ThemedColor::new(Rgb(0xdda0dd), Rgb(0xdda0dd))),
    ("purple", ThemedColor::new(Rgb(0x800080), Rgb(0xd0a1d0))),
    ("red", ThemedColor::new(Rgb(0xff0000), Rgb(0xff0000))),
    ("royalblue", ThemedColor::new(Rgb(0x4169e1), Rgb(0x829ceb))),
    ("saddlebrown", ThemedColor::new(Rgb(0x8b4513), Rgb(0xc9a890))),
    ("salmon", ThemedColor::new(Rgb(0xfa8072), Rgb(0xfa8072))),
    ("seagreen", ThemedColor::new(Rgb(0x2e8b57), Rgb(0x64a982))),
    ("sienna", ThemedColor::new(Rgb(0xa0522d), Rgb(0xc89b86))),
    ("silver", ThemedColor::new(Rgb(0xc0c0c0), Rgb(0xc0c0c0))),
    ("skyblue", ThemedColor::new(Rgb(0x87ceeb), Rgb(0x87ceeb))),
    ("slateblue", ThemedColor::new(Rgb(0x6a5acd), Rgb(0xa59be1))),
    ("slategray", ThemedColor::new(Rgb(0x708090), Rgb(0x708090))),
    ("springgreen", ThemedColor::new(Rgb(0x00ff7f), Rgb(0x00ff7f))),
    ("steelblue", ThemedColor::new(Rgb(0x4682b4), Rgb(0x4682b4))),
    ("tan", ThemedColor::new(Rgb(0xd2b48c), Rgb(0xd2b48c))),
    ("teal", ThemedColor::new(Rgb(0x008080), Rgb(0x55aaaa))),
    ("tomato", ThemedColor::new(Rgb(0xff6347), Rgb(0xff6347))),
    ("turquoise", ThemedColor::new(Rgb(0x40e0d0), Rgb(0x40e0d0))),
    ("violet", ThemedColor::new(Rgb(0xee82ee), Rgb(0xee82ee))),
    ("wheat", ThemedColor::new(Rgb(0xf5deb3), Rgb(0xf5deb3))),
    ("white", ThemedColor::new(Rgb(0xffffff), Rgb(0xe6e6e6))),
    ("yellow", ThemedColor::new(Rgb(0xffff00), Rgb(0xe6e600))),
    ("yellowgreen", ThemedColor::new(Rgb(0x9acd32), Rgb(0x9acd32))),
];

/// Look up a palette color by name (case-insensitive).
pub fn lookup(name: &str) -> Option<ThemedColor> {
    let key = name.trim().to_ascii_lowercase();
    PALETTE
        .binary_search_by(|(entry, _)| (*entry).cmp(key.as_str()))
        .ok()
        .map(|idx| PALETTE[idx].1)
}

/// Number of named colors.
pub fn len() -> usize {
    PALETTE.len()
}
