use super::types::ImageInfo;

pub(super) static AVAILABLE_IMAGES: &[ImageInfo] = &[
    // Generic Ubuntu
    ImageInfo {
        id: "ubuntu-base",
        name: "accetto/ubuntu-vnc-xfce-g3",
        description: "Base Ubuntu with VNC and Xfce",
        category: "Generic Ubuntu",
        tags: &["ubuntu", "base", "xfce"],
    },
    ImageInfo {
        id: "ubuntu-chromium",
        name: "accetto/ubuntu-vnc-xfce-chromium-g3",
        description: "Ubuntu with Chromium browser",
        category: "Generic Ubuntu",
        tags: &["ubuntu", "chromium", "browser"],
    },
    ImageInfo {
        id: "ubuntu-firefox",
        name: "accetto/ubuntu-vnc-xfce-firefox-g3",
        description: "Ubuntu with Firefox browser",
        category: "Generic Ubuntu",
        tags: &["ubuntu", "firefox", "browser"],
    },
    ImageInfo {
        id: "ubuntu-opengl",
        name: "accetto/ubuntu-vnc-xfce-opengl-g3",
        description: "Ubuntu with Mesa3D and VirtualGL support",
        category: "Generic Ubuntu",
        tags: &["ubuntu", "opengl", "graphics", "3d"],
    },
    // Generic Debian
    ImageInfo {
        id: "debian-base",
        name: "accetto/debian-vnc-xfce-g3",
        description: "Base Debian with VNC and Xfce",
        category: "Generic Debian",
        tags: &["debian", "base", "xfce"],
    },
    ImageInfo {
        id: "debian-chromium",
        name: "accetto/debian-vnc-xfce-chromium-g3",
        description: "Debian with Chromium browser",
        category: "Generic Debian",
        tags: &["debian", "chromium", "browser"],
    },
    ImageInfo {
        id: "debian-firefox",
        name: "accetto/debian-vnc-xfce-firefox-g3",
        description: "Debian with Firefox browser",
        category: "Generic Debian",
        tags: &["debian", "firefox", "browser"],
    },
    // Graphics and modeling
    ImageInfo {
        id: "ubuntu-blender",
        name: "accetto/ubuntu-vnc-xfce-blender-g3",
        description: "Ubuntu with Blender for 3D modeling",
        category: "Graphics and Modeling",
        tags: &["ubuntu", "blender", "3d", "modeling"],
    },
    ImageInfo {
        id: "ubuntu-drawio",
        name: "accetto/ubuntu-vnc-xfce-drawio-g3",
        description: "Ubuntu with Draw.io for diagrams",
        category: "Graphics and Modeling",
        tags: &["ubuntu", "drawio", "diagrams"],
    },
    ImageInfo {
        id: "ubuntu-freecad",
        name: "accetto/ubuntu-vnc-xfce-freecad-g3",
        description: "Ubuntu with FreeCAD for CAD modeling",
        category: "Graphics and Modeling",
        tags: &["ubuntu", "freecad", "cad", "modeling"],
    },
    ImageInfo {
        id: "ubuntu-gimp",
        name: "accetto/ubuntu-vnc-xfce-gimp-g3",
        description: "Ubuntu with GIMP for image editing",
        category: "Graphics and Modeling",
        tags: &["ubuntu", "gimp", "image-editing"],
    },
    ImageInfo {
        id: "ubuntu-inkscape",
        name: "accetto/ubuntu-vnc-xfce-inkscape-g3",
        description: "Ubuntu with Inkscape for vector graphics",
        category: "Graphics and Modeling",
        tags: &["ubuntu", "inkscape", "vector-graphics"],
    },
    // Development
    ImageInfo {
        id: "debian-nodejs",
        name: "accetto/debian-vnc-xfce-nodejs-g3",
        description: "Debian with Node.js development environment",
        category: "Development",
        tags: &["debian", "nodejs", "development", "javascript"],
    },
    ImageInfo {
        id: "debian-nvm",
        name: "accetto/debian-vnc-xfce-nvm-g3",
        description: "Debian with NVM for Node.js version management",
        category: "Development",
        tags: &["debian", "nvm", "nodejs", "development"],
    },
    ImageInfo {
        id: "debian-postman",
        name: "accetto/debian-vnc-xfce-postman-g3",
        description: "Debian with Postman for API testing",
        category: "Development",
        tags: &["debian", "postman", "api-testing"],
    },
    ImageInfo {
        id: "debian-python",
        name: "accetto/debian-vnc-xfce-python-g3",
        description: "Debian with Python development environment",
        category: "Development",
        tags: &["debian", "python", "development"],
    },
    ImageInfo {
        id: "debian-vscode",
        name: "accetto/debian-vnc-xfce-vscode-g3",
        description: "Debian with Visual Studio Code",
        category: "Development",
        tags: &["debian", "vscode", "ide", "development"],
    },
];
