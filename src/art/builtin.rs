use crate::error::{Error, Result};

pub struct BuiltinArt {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub segments: &'static [&'static str],
}

pub const TUX: &[&str] = &[
    "#FFFFFF",
    "        .--.",
    "       |o",
    "#F0C000",
    "$_",
    "#FFFFFF",
    "$o |",
    "       |:_/ |",
    r"      //   \ \",
    "     (|     | )",
    r"    /'\_   _/`\",
    "#F0C000",
    r"    \___)=(___/",
];

pub const ARCH: &[&str] = &[
    "#1793D1",
    "                   -`",
    "                  .o+`",
    "                 `ooo/",
    "                `+oooo:",
    "               `+oooooo:",
    "               -+oooooo+:",
    "             `/:-:++oooo+:",
    "            `/++++/+++++++:",
    "           `/++++++++++++++:",
    "          `/+++ooooooooooooo/`",
    "         ./ooosssso++osssssso+`",
    "        .oossssso-````/ossssss+`",
    "       -osssssso.      :ssssssso.",
    "      :osssssss/        osssso+++.",
    "     /ossssssss/        +ssssooo/-",
    "   `/ossssso+/:-        -:/+osssso+-",
    "  `+sso+:-`                 `.-/+oso:",
    " `++:.                           `-/+/",
    " .`                                 `/",
];

pub const ARCH_CLASSIC: &[&str] = &[
    "#1793D1",
    r"       /\",
    r"      /  \",
    r"     /\   \",
    "#FFFFFF",
    r"    /      \",
    r"   /   ,,   \",
    r"  /   |  |  -\",
    r" /_-''    ''-_\",
];

pub const ARCH_ALT: &[&str] = &[
    "#1793D1",
    r"          /\",
    r"         /  \",
    r"        /    \",
    r"       /      \",
    r"      /   ,,   \",
    "      /   |",
    "#FFFFFF",
    "$  ",
    "#1793D1",
    r"$|   \",
    r"     /   /    \   \",
    r"    /_-''      ''-_\",
];

pub const DEBIAN: &[&str] = &[
    "#D70A53",
    "       _,met$$$$$gg.",
    "    ,g$$$$$$$$$$$$$$$P.",
    r#"  ,g$$P"     """Y$$."."#,
    " ,$$P'              `$$$.",
    "',$$P       ,ggs.     `$$b:",
    r#"`d$$'     ,$P"'   .    $$$"#,
    " $$P      d$'     ,    $$P",
    " $$:      $$.   -    ,d$$'",
    " $$;      Y$b._   _,d$P'",
    r#" Y$$.    `.`"Y$$$$P"'"#,
    r#" `$$b      "-.__"#,
    "  `Y$$",
    "   `Y$$.",
    "     `$$b.",
    "       `Y$$b.",
    r#"          `"Y$b._"#,
    r#"              `""""#,
];

pub const FEDORA: &[&str] = &[
    "#51A2DA",
    "      _____",
    r"     /   __)\",
    r"     |  /  \ \",
    "  ___|  |__/ /",
    " / (_    _)_/",
    "/ /  |  |",
    r"\ \__/  |",
    r" \(_____/",
];

pub const GENTOO: &[&str] = &[
    "#989ef7",
    "   _-----_",
    r"  (       \",
    r"  \    0   \",
    r"   \        )",
    "   /      _/",
    "  (     _-",
    r"  \____-",
];

pub const REDHAT: &[&str] = &[
    "#FF0000",
    "           .MMM..:MMMMMMM",
    "          MMMMMMMMMMMMMMMMMM",
    "          MMMMMMMMMMMMMMMMMMMM.",
    "         MMMMMMMMMMMMMMMMMMMMMM",
    "        ,MMMMMMMMMMMMMMMMMMMMMM:",
    "        MMMMMMMMMMMMMMMMMMMMMMMM",
    "  .MMMM'  MMMMMMMMMMMMMMMMMMMMMM",
    " MMMMMM    `MMMMMMMMMMMMMMMMMMMM.",
    "MMMMMMMM      MMMMMMMMMMMMMMMMMM .",
    "MMMMMMMMM.       `MMMMMMMMMMMMM' MM.",
    "MMMMMMMMMMM.                     MMMM",
    "`MMMMMMMMMMMMM.                 ,MMMMM.",
    " `MMMMMMMMMMMMMMMMM.          ,MMMMMMMM.",
    "    MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM",
    "      MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM:",
    "         MMMMMMMMMMMMMMMMMMMMMMMMMMMMMM",
    "            `MMMMMMMMMMMMMMMMMMMMMMMM:",
    "                ``MMMMMMMMMMMMMMMMM'",
];

pub const MINT: &[&str] = &[
    "#87CF3E",
    " ___________",
    r"|_          \",
    "  | ",
    "#FFFFFF",
    "$| _____ ",
    "#87CF3E",
    "$|",
    "  | ",
    "#FFFFFF",
    "$| | | | ",
    "#87CF3E",
    "$|",
    "  | ",
    "#FFFFFF",
    "$| | | | ",
    "#87CF3E",
    "$|",
    "  | ",
    "#FFFFFF",
    r"$\_____/ ",
    "#87CF3E",
    "$|",
    r"  \_________/",
];

pub const SLACKWARE: &[&str] = &[
    "#6A7FD2",
    "   ________",
    "  /  ______|",
    "  | |______",
    r"  \______  \",
    "   ______| |",
    "| |________/",
    "|____________",
];

pub const APPLE: &[&str] = &[
    "#61BB46",
    "                    'c.",
    "                 ,xNMM.",
    "               .OMMMMo",
    "               OMMM0,",
    "     .;loddo:' loolloddol;.",
    "   cKMMMMMMMMMMNWMMMMMMMMMM0:",
    "#FDB827",
    " .KMMMMMMMMMMMMMMMMMMMMMMMWd.",
    " XMMMMMMMMMMMMMMMMMMMMMMMX.",
    "#F5821F",
    ";MMMMMMMMMMMMMMMMMMMMMMMM:",
    ":MMMMMMMMMMMMMMMMMMMMMMMM:",
    "#E03A3E",
    ".MMMMMMMMMMMMMMMMMMMMMMMMX.",
    " kMMMMMMMMMMMMMMMMMMMMMMMMWd.",
    "#963D97",
    " .XMMMMMMMMMMMMMMMMMMMMMMMMMMk",
    "  .XMMMMMMMMMMMMMMMMMMMMMMMMK.",
    "#009DDC",
    "    kMMMMMMMMMMMMMMMMMMMMMMd",
    "     ;KMMMMMMMWXXWMMMMMMMk.",
    "       .cooc,.    .,coo:.",
];

pub const APPLE_MINI: &[&str] = &[
    "#61BB46",
    "        .:'",
    "    __ :'__",
    "#FDB827",
    " .'`  `-'  ``.",
    "#F5821F",
    ":          .-'",
    "#E03A3E",
    ":         :",
    "#963D97",
    " :         `-;",
    "#009DDC",
    "  `.__.-.__.'",
];

pub const NIXOS: &[&str] = &[
    "#5277C3",
    r"  \\  ",
    "#7EB4DA",
    r"$\\ //",
    "#5277C3",
    r" ==\\__",
    "#7EB4DA",
    r"$\\/ //",
    "#5277C3",
    r"   //   \\//",
    "#7EB4DA",
    "==//     //==",
    "#5277C3",
    r" //\\___//",
    "#7EB4DA",
    r"// /\\  ",
    "#5277C3",
    r"$\\==",
    "#7EB4DA",
    r"  // \\  \\",
];

pub const VOID: &[&str] = &[
    "#478061",
    "    _______",
    r" _ \______ -",
    r"| \  ___  \ |",
    "| | /   ",
    "#FFFFFF",
    r"$\ | |",
    "#478061",
    r"| | \___/ | |",
    r"| \______ \_|",
    r" -_______\",
];

pub const ENDEAVOUR: &[&str] = &[
    "#FF0000",
    "          /o.",
    "        /sssso-",
    "#963D97",
    "      /ossssssso:",
    "    /ssssssssssso+",
    "#7F3FBF",
    "  /ssssssssssssssso+",
    "//osssssssssssssso+-",
    "#009DDC",
    " `+++++++++++++++-`",
];

pub const BUILTIN: &[BuiltinArt] = &[
    BuiltinArt { name: "arch", aliases: &[], segments: ARCH },
    BuiltinArt { name: "arch-classic", aliases: &[], segments: ARCH_CLASSIC },
    BuiltinArt { name: "arch-alt", aliases: &[], segments: ARCH_ALT },
    BuiltinArt { name: "fedora", aliases: &[], segments: FEDORA },
    BuiltinArt { name: "gentoo", aliases: &[], segments: GENTOO },
    BuiltinArt { name: "redhat", aliases: &["rhel"], segments: REDHAT },
    BuiltinArt { name: "mint", aliases: &["linuxmint"], segments: MINT },
    BuiltinArt { name: "slackware", aliases: &[], segments: SLACKWARE },
    BuiltinArt { name: "debian", aliases: &[], segments: DEBIAN },
    FALLBACK,
    BuiltinArt { name: "apple", aliases: &["macos"], segments: APPLE },
    BuiltinArt { name: "apple-mini", aliases: &[], segments: APPLE_MINI },
    BuiltinArt { name: "nixos", aliases: &[], segments: NIXOS },
    BuiltinArt { name: "endeavour", aliases: &["endeavouros"], segments: ENDEAVOUR },
    BuiltinArt { name: "void", aliases: &[], segments: VOID },
];

/// Drawn when the distro has no art of its own.
pub const FALLBACK: BuiltinArt = BuiltinArt {
    name: "tux",
    aliases: &["linux"],
    segments: TUX,
};

/// Look up an art set by name or alias, case-insensitively.
pub fn find(name: &str) -> Option<&'static BuiltinArt> {
    let name = name.trim().to_ascii_lowercase();
    BUILTIN
        .iter()
        .find(|art| art.name == name || art.aliases.contains(&name.as_str()))
}

/// The art set for an os-release `ID`.
pub fn for_distro(distro: Option<&str>) -> &'static str {
    let Some(id) = distro else {
        return FALLBACK.name;
    };
    match id.to_ascii_lowercase().as_str() {
        "arch" | "archlinux" => "arch-classic",
        "fedora" => "fedora",
        "gentoo" => "gentoo",
        "redhat" | "rhel" => "redhat",
        "linuxmint" | "mint" => "mint",
        "slackware" => "slackware",
        "debian" => "debian",
        "nixos" => "nixos",
        "void" => "void",
        "endeavouros" => "endeavour",
        "macos" => "apple",
        _ => FALLBACK.name,
    }
}

/// Resolve a configured name. `auto` picks by distro.
pub fn select(name: &str, distro: Option<&str>) -> Result<&'static BuiltinArt> {
    let name = if name.trim().eq_ignore_ascii_case("auto") {
        for_distro(distro)
    } else {
        name
    };
    find(name).ok_or_else(|| Error::UnknownArt(name.to_string()))
}

/// Like [`select`], but an unknown name draws [`FALLBACK`] with a warning.
pub fn select_or_fallback(name: &str, distro: Option<&str>) -> &'static BuiltinArt {
    select(name, distro).unwrap_or_else(|e| {
        log::warn!("{}, drawing {}", e, FALLBACK.name);
        &FALLBACK
    })
}
