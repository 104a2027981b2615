//! Dockerfile, `.dockerignore`, `nginx.conf` and compose file contents.

use std::fs;
use std::path::Path;

use crate::detection::ProjectKind;

/// Which Docker files to add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerSetup {
    Dockerfile,
    Compose,
    Both,
}

impl DockerSetup {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "dockerfile" => Some(Self::Dockerfile),
            "compose" => Some(Self::Compose),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn wants_dockerfile(self) -> bool {
        self != Self::Compose
    }

    pub fn wants_compose(self) -> bool {
        self != Self::Dockerfile
    }
}

/// Contents of the Docker files for one project.
#[derive(Debug, Clone)]
pub struct DockerFiles {
    kind: ProjectKind,
    name: String,
    /// Django settings package holding `wsgi.py`.
    wsgi_module: String,
}

impl DockerFiles {
    /// Files for the project at `root`.
    pub fn for_project(kind: ProjectKind, name: &str, root: &Path) -> Self {
        let wsgi_module = match kind {
            ProjectKind::Django => find_wsgi_module(root),
            _ => None,
        }
        .unwrap_or_else(|| name.replace('-', "_"));
        Self {
            kind,
            name: name.to_string(),
            wsgi_module,
        }
    }

    /// Dockerfile, or `None` when there is no template for the kind.
    pub fn dockerfile(&self) -> Option<String> {
        let port = self.kind.default_port().to_string();
        let text = match self.kind {
            ProjectKind::NextJs => NEXTJS_DOCKERFILE.to_string(),
            ProjectKind::React | ProjectKind::Vue => STATIC_SITE_DOCKERFILE.to_string(),
            ProjectKind::Express | ProjectKind::NodeJs => {
                NODE_SERVER_DOCKERFILE.replace("{port}", &port)
            }
            ProjectKind::Django => DJANGO_DOCKERFILE.replace("{module}", &self.wsgi_module),
            ProjectKind::FastApi => FASTAPI_DOCKERFILE.to_string(),
            ProjectKind::Flask | ProjectKind::Python => PYTHON_DOCKERFILE.to_string(),
            ProjectKind::Monorepo | ProjectKind::Unknown => return None,
        };
        Some(text)
    }

    /// Static sites are served by nginx and need its config.
    pub fn nginx_conf(&self) -> Option<&'static str> {
        matches!(self.kind, ProjectKind::React | ProjectKind::Vue).then_some(NGINX_CONF)
    }

    pub fn dockerignore(&self) -> &'static str {
        DOCKERIGNORE
    }

    /// `docker-compose.yml`, optionally with a Postgres service.
    pub fn compose(&self, with_database: bool) -> String {
        let mut out = String::from("services:\n");
        if self.kind == ProjectKind::Monorepo {
            out.push_str(MONOREPO_SERVICES);
            if with_database {
                out.push_str("    depends_on:\n      - db\n");
            }
        } else {
            let port = self.kind.default_port();
            out.push_str(&format!(
                "  {service}:\n    build: .\n    ports:\n      - \"{port}:{port}\"\n    env_file:\n      - .env\n    volumes:\n      - .:/app\n    restart: unless-stopped\n",
                service = self.name.replace('-', "_"),
                port = port,
            ));
            if with_database {
                out.push_str("    depends_on:\n      - db\n");
            }
        }
        if with_database {
            out.push_str(DATABASE_SERVICE);
        }
        out
    }
}

/// First child directory of `root` holding a `wsgi.py`.
fn find_wsgi_module(root: &Path) -> Option<String> {
    let mut modules: Vec<String> = fs::read_dir(root)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().join("wsgi.py").is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    modules.sort();
    modules.into_iter().next()
}

const NEXTJS_DOCKERFILE: &str = r#"# Build stage
FROM node:20-alpine AS builder

WORKDIR /app

COPY package*.json ./
RUN npm ci

COPY . .
RUN npm run build

# Production stage
FROM node:20-alpine AS runner

WORKDIR /app

ENV NODE_ENV=production

# Requires output: "standalone" in next.config
COPY --from=builder /app/public ./public
COPY --from=builder /app/.next/standalone ./
COPY --from=builder /app/.next/static ./.next/static

EXPOSE 3000

CMD ["node", "server.js"]
"#;

const STATIC_SITE_DOCKERFILE: &str = r#"# Build stage
FROM node:20-alpine AS builder

WORKDIR /app

COPY package*.json ./
RUN npm ci

COPY . .
RUN npm run build

# Production stage
FROM nginx:alpine

COPY --from=builder /app/dist /usr/share/nginx/html
COPY nginx.conf /etc/nginx/conf.d/default.conf

EXPOSE 80

CMD ["nginx", "-g", "daemon off;"]
"#;

const NODE_SERVER_DOCKERFILE: &str = r#"FROM node:20-alpine

WORKDIR /app

ENV NODE_ENV=production

COPY package*.json ./
RUN npm ci --omit=dev

COPY . .

EXPOSE {port}

CMD ["npm", "start"]
"#;

const DJANGO_DOCKERFILE: &str = r#"FROM python:3.12-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

RUN python manage.py collectstatic --noinput

EXPOSE 8000

CMD ["gunicorn", "--bind", "0.0.0.0:8000", "--workers", "4", "{module}.wsgi:application"]
"#;

const FASTAPI_DOCKERFILE: &str = r#"FROM python:3.12-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

EXPOSE 8000

CMD ["uvicorn", "main:app", "--host", "0.0.0.0", "--port", "8000"]
"#;

const PYTHON_DOCKERFILE: &str = r#"FROM python:3.12-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

CMD ["python", "main.py"]
"#;

const NGINX_CONF: &str = r#"server {
    listen 80;
    server_name localhost;
    root /usr/share/nginx/html;
    index index.html;

    location / {
        try_files $uri $uri/ /index.html;
    }

    gzip on;
    gzip_types text/plain text/css application/json application/javascript text/xml application/xml application/xml+rss text/javascript;

    location ~* \.(jpg|jpeg|png|gif|ico|css|js)$ {
        expires 1y;
        add_header Cache-Control "public, immutable";
    }
}
"#;

const DOCKERIGNORE: &str = r#"# Dependencies
node_modules/
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Python
__pycache__/
*.py[cod]
venv/
.venv/
*.egg-info/

# Environment
.env
.env.local
.env.*.local

# IDE
.vscode/
.idea/
*.swp

# Git
.git/

# Build outputs
dist/
build/
.next/
out/

# OS
.DS_Store
Thumbs.db

# Tests
coverage/
.pytest_cache/
"#;

const MONOREPO_SERVICES: &str = r#"  web:
    build: ./web
    ports:
      - "3000:3000"
    environment:
      - API_URL=http://api:8000
    volumes:
      - ./web:/app
      - /app/node_modules
    depends_on:
      - api
    restart: unless-stopped

  api:
    build: ./api
    ports:
      - "8000:8000"
    env_file:
      - ./api/.env
    volumes:
      - ./api:/app
    restart: unless-stopped
"#;

const DATABASE_SERVICE: &str = r#"
  db:
    image: postgres:16-alpine
    environment:
      POSTGRES_DB: mydb
      POSTGRES_USER: user
      POSTGRES_PASSWORD: password
    ports:
      - "5432:5432"
    volumes:
      - pgdata:/var/lib/postgresql/data
    restart: unless-stopped

volumes:
  pgdata:
"#;
